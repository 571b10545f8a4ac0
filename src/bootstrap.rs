// ABOUTME: Bootstrap glue for the slidewire crate
// ABOUTME: Wires the presentation application to the document and the highlighter

use crate::app::{AppFlags, Presentation, SlideChange};
use crate::config::Config;
use crate::dom::Document;
use crate::errors::{Result, WireError};
use crate::highlight::Highlighter;
use log::{debug, info};
use std::sync::mpsc::Receiver;

/// The wired-up presentation: one application instance, the single
/// subscription to its slide-change channel, and the highlighter that runs
/// on every notification. Owned by the caller; lives until dropped, with no
/// explicit teardown.
pub struct Bootstrap {
    app: Presentation,
    notifications: Receiver<SlideChange>,
    highlighter: Highlighter,
}

/// Mount the presentation into the document and subscribe the highlighting
/// handler to its slide-change channel.
///
/// Fails with [`WireError::MountPointMissing`] when no element carries
/// `config.container_id` — a missing mount point is reported rather than
/// silently ignored.
pub fn initialize(doc: &mut Document, config: &Config) -> Result<Bootstrap> {
    let mount = doc
        .element_by_id(&config.container_id)
        .ok_or_else(|| WireError::MountPointMissing(config.container_id.clone()))?;

    let mut app = Presentation::init(
        doc,
        mount,
        AppFlags {
            url: config.source.clone(),
        },
    )?;
    let notifications = app.subscribe()?;
    let highlighter = Highlighter::with_theme(&config.theme)?;

    info!(
        "Presentation mounted at #{} from {} (theme {})",
        config.container_id,
        config.source,
        highlighter.theme_name()
    );

    Ok(Bootstrap {
        app,
        notifications,
        highlighter,
    })
}

impl Bootstrap {
    pub fn app(&self) -> &Presentation {
        &self.app
    }

    /// Mutable access to the application, for callers that drive navigation
    /// themselves and process notifications in a separate step.
    pub fn app_mut(&mut self) -> &mut Presentation {
        &mut self.app
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Drain pending slide-change notifications in order. Each one triggers
    /// a full scan-and-highlight pass over the code blocks present at that
    /// moment; rapid successive notifications are not coalesced. Returns the
    /// number of notifications processed.
    pub fn process_notifications(&mut self, doc: &mut Document) -> Result<usize> {
        let mut processed = 0;
        while let Ok(change) = self.notifications.try_recv() {
            debug!("Slide changed to {} ({:?})", change.index, change.title);
            self.rehighlight_all(doc)?;
            processed += 1;
        }
        Ok(processed)
    }

    /// One scan-and-highlight pass over every code block currently in the
    /// document. Returns the number of blocks highlighted.
    pub fn rehighlight_all(&mut self, doc: &mut Document) -> Result<usize> {
        let blocks = doc.code_blocks();
        for block in &blocks {
            self.highlighter.highlight_block(doc, *block)?;
        }
        debug!("Highlighted {} code blocks", blocks.len());
        Ok(blocks.len())
    }

    /// Advance to the next slide and process the resulting notification.
    pub fn next_slide(&mut self, doc: &mut Document) -> Result<bool> {
        let moved = self.app.next_slide(doc)?;
        self.process_notifications(doc)?;
        Ok(moved)
    }

    /// Go back to the previous slide and process the resulting notification.
    pub fn prev_slide(&mut self, doc: &mut Document) -> Result<bool> {
        let moved = self.app.prev_slide(doc)?;
        self.process_notifications(doc)?;
        Ok(moved)
    }

    /// Jump to a slide and process the resulting notification.
    pub fn goto_slide(&mut self, doc: &mut Document, index: usize) -> Result<()> {
        self.app.goto_slide(doc, index)?;
        self.process_notifications(doc)?;
        Ok(())
    }
}
