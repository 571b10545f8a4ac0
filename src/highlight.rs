// ABOUTME: Syntax highlighting module for the slidewire application
// ABOUTME: Applies syntect classed-span highlighting to code block elements

use crate::dom::{Document, NodeId};
use crate::errors::{Result, WireError};
use log::{debug, info};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

/// Syntax highlighter for code block elements.
///
/// Output is class-based `<span>` markup; [`theme_css`](Self::theme_css)
/// provides the matching stylesheet. Highlighting is a pure function of the
/// block's source text, so re-running a pass over unchanged blocks produces
/// identical markup.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme_name: String,
    theme_css: String,
}

impl Highlighter {
    /// Create a highlighter with the default theme.
    pub fn new() -> Result<Self> {
        Self::with_theme("InspiredGitHub")
    }

    /// Create a highlighter with a named theme from the default theme set.
    pub fn with_theme(theme_name: &str) -> Result<Self> {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let themes = ThemeSet::load_defaults();
        let theme = themes.themes.get(theme_name).ok_or_else(|| {
            WireError::ConfigError(format!("Unknown highlight theme: {}", theme_name))
        })?;
        let theme_css = css_for_theme_with_class_style(theme, CLASS_STYLE)?;

        info!("Highlighter initialized with theme {}", theme_name);

        Ok(Self {
            syntaxes,
            theme_name: theme_name.to_string(),
            theme_css,
        })
    }

    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    /// Stylesheet for the classed spans this highlighter emits.
    pub fn theme_css(&self) -> &str {
        &self.theme_css
    }

    /// Highlight source code into classed-span HTML.
    /// An unknown or absent language falls back to plain text.
    pub fn highlight(&self, lang: Option<&str>, source: &str) -> Result<String> {
        let syntax = lang
            .and_then(|l| self.syntaxes.find_syntax_by_token(l))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());

        debug!(
            "Highlighting {} bytes as {}",
            source.len(),
            syntax.name
        );

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, CLASS_STYLE);
        for line in LinesWithEndings::from(source) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }

    /// Highlight one code block element in place: read its source text and
    /// `language-*` class, write the rendered markup back onto the node.
    pub fn highlight_block(&self, doc: &mut Document, block: NodeId) -> Result<()> {
        let source = doc.text(block).to_string();
        let lang = doc
            .classes(block)
            .iter()
            .find_map(|c| c.strip_prefix("language-"))
            .map(str::to_string);

        let markup = self.highlight(lang.as_deref(), &source)?;
        doc.set_rendered(block, &markup);
        Ok(())
    }
}
