// ABOUTME: Host presentation application for the slidewire crate
// ABOUTME: Renders the current slide into a mount element and emits slide-change notifications

use crate::deck::{prose_to_html, Deck, SlideBlock};
use crate::dom::{Document, NodeId};
use crate::errors::{Result, WireError};
use log::{debug, info};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Startup flags for the presentation application.
pub struct AppFlags {
    /// Path or URL of the presentation markdown source
    pub url: String,
}

/// Notification emitted each time the displayed slide changes.
/// Subscribers treat this as an opaque trigger; the fields exist for
/// diagnostics, not for the highlighting path.
#[derive(Debug, Clone)]
pub struct SlideChange {
    pub index: usize,
    pub title: String,
}

/// The presentation application: owns the parsed deck and the mount element,
/// renders one slide at a time, and signals every slide change through a
/// single-consumer channel.
pub struct Presentation {
    mount: NodeId,
    url: String,
    deck: Deck,
    current: usize,
    events: Sender<SlideChange>,
    // Handed out once by subscribe(); notifications queue here until then.
    pending: Option<Receiver<SlideChange>>,
}

impl Presentation {
    /// Construct the application against a mount element, loading the deck
    /// from `flags.url` and rendering the first slide. The initial render
    /// emits a slide-change notification like any other.
    pub fn init(doc: &mut Document, mount: NodeId, flags: AppFlags) -> Result<Self> {
        info!("Initializing presentation from {}", flags.url);

        let deck = Deck::load(&flags.url)?;
        let (events, receiver) = channel();

        let mut app = Self {
            mount,
            url: flags.url,
            deck,
            current: 0,
            events,
            pending: Some(receiver),
        };
        app.render_current(doc)?;
        Ok(app)
    }

    /// Take the receiving end of the slide-change channel.
    /// There is exactly one consumer; a second call is an error.
    pub fn subscribe(&mut self) -> Result<Receiver<SlideChange>> {
        self.pending.take().ok_or_else(|| {
            WireError::ChannelError("slide-change channel already subscribed".to_string())
        })
    }

    pub fn source_url(&self) -> &str {
        &self.url
    }

    pub fn mount(&self) -> NodeId {
        self.mount
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn slide_count(&self) -> usize {
        self.deck.slides.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Advance to the next slide. Returns false when already on the last one.
    pub fn next_slide(&mut self, doc: &mut Document) -> Result<bool> {
        if self.current + 1 >= self.slide_count() {
            return Ok(false);
        }
        self.current += 1;
        self.render_current(doc)?;
        Ok(true)
    }

    /// Go back to the previous slide. Returns false when already on the first.
    pub fn prev_slide(&mut self, doc: &mut Document) -> Result<bool> {
        if self.current == 0 {
            return Ok(false);
        }
        self.current -= 1;
        self.render_current(doc)?;
        Ok(true)
    }

    /// Jump to a specific slide.
    pub fn goto_slide(&mut self, doc: &mut Document, index: usize) -> Result<()> {
        if index >= self.slide_count() {
            return Err(WireError::SlideOutOfRange {
                index,
                count: self.slide_count(),
            });
        }
        self.current = index;
        self.render_current(doc)
    }

    /// Rebuild the mount element's subtree for the current slide and emit a
    /// slide-change notification.
    fn render_current(&mut self, doc: &mut Document) -> Result<()> {
        let slide = self.deck.slides[self.current].clone();
        debug!("Rendering slide {} ({:?})", self.current, slide.title);

        doc.clear_children(self.mount);

        let wrapper = doc.create_element("div");
        doc.add_class(wrapper, "slide");
        doc.append_child(self.mount, wrapper);

        if !slide.title.is_empty() {
            let heading = doc.create_element("h1");
            doc.set_text(heading, &slide.title);
            doc.append_child(wrapper, heading);
        }

        for block in &slide.blocks {
            match block {
                SlideBlock::Prose(markdown) => {
                    let prose = doc.create_element("div");
                    doc.set_rendered(prose, &prose_to_html(markdown));
                    doc.append_child(wrapper, prose);
                }
                SlideBlock::Code { lang, source } => {
                    let pre = doc.create_element("pre");
                    let code = doc.create_element("code");
                    if let Some(lang) = lang {
                        doc.add_class(code, &format!("language-{}", lang));
                    }
                    doc.set_text(code, source);
                    doc.append_child(pre, code);
                    doc.append_child(wrapper, pre);
                }
            }
        }

        // Delivery failure means the consumer is gone; the presentation
        // itself keeps working, so the send result is ignored.
        let _ = self.events.send(SlideChange {
            index: self.current,
            title: slide.title,
        });

        Ok(())
    }
}
