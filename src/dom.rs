// ABOUTME: Document model for the slidewire application
// ABOUTME: Owned element arena with id lookup and code-block queries

use log::debug;

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    /// Source text content. For code blocks this is the raw program text,
    /// kept separate from any rendered markup so a highlighting pass can
    /// always recompute from the original.
    text: String,
    /// Rendered inner markup. When set it replaces the escaped text on
    /// serialization and is overwritten wholesale by the next render.
    rendered: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            rendered: None,
            children: Vec::new(),
            parent: None,
        }
    }
}

/// An owned document tree.
///
/// Elements are stored in an arena and addressed by [`NodeId`] handles.
/// Detaching a subtree (see [`clear_children`](Self::clear_children)) leaves
/// its nodes in the arena but removes them from the tree; queries only ever
/// walk the tree, so detached elements are invisible to them.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with a `body` root element.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body")],
            root: NodeId(0),
        }
    }

    /// The root element of the document.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element with the given tag.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    /// Append `child` as the last child of `parent`.
    /// A child already attached elsewhere is moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.nodes[old_parent.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Detach all children of `parent`. The detached subtrees stay in the
    /// arena but are no longer part of the tree.
    pub fn clear_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        debug!("Detaching {} children from node {:?}", children.len(), parent);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.push(class.to_string());
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = text.to_string();
    }

    pub fn set_rendered(&mut self, node: NodeId, markup: &str) {
        self.nodes[node.0].rendered = Some(markup.to_string());
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    pub fn rendered(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].rendered.as_deref()
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.nodes[node.0].classes
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Find the attached element with the given id, if any.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk().find(|n| self.nodes[n.0].id.as_deref() == Some(id))
    }

    /// All code blocks currently in the document: every `code` element whose
    /// parent is a `pre`, in document order. Re-evaluated on every call.
    pub fn code_blocks(&self) -> Vec<NodeId> {
        self.walk()
            .filter(|n| {
                self.nodes[n.0].tag == "code"
                    && self.nodes[n.0]
                        .parent
                        .map(|p| self.nodes[p.0].tag == "pre")
                        .unwrap_or(false)
            })
            .collect()
    }

    /// Depth-first iterator over all attached elements, root first.
    fn walk(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            for child in self.nodes[next.0].children.iter().rev() {
                stack.push(*child);
            }
            Some(next)
        })
    }

    /// Serialize the document tree to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let n = &self.nodes[node.0];
        out.push('<');
        out.push_str(&n.tag);
        if let Some(id) = &n.id {
            out.push_str(&format!(r#" id="{}""#, id));
        }
        if !n.classes.is_empty() {
            out.push_str(&format!(r#" class="{}""#, n.classes.join(" ")));
        }
        out.push('>');

        match &n.rendered {
            // Rendered markup is trusted output of the markdown converter or
            // the highlighter and is emitted as-is.
            Some(markup) => out.push_str(markup),
            None => out.push_str(&escape_html(&n.text)),
        }

        for child in &n.children {
            self.write_node(*child, out);
        }

        out.push_str(&format!("</{}>", n.tag));
    }
}

/// Escape text content for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
