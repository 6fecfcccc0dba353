//! Creating, editing and removing links.

use crate::annotation::{LinkAnnotation, LinkStyle};
use crate::attributes;
use crate::document::Document;
use crate::error::LinkError;
use crate::transaction::LinkTransaction;

/// Applies link edits to a document.
///
/// Every link it creates carries the style it was built with.
#[derive(Debug, Clone, Copy)]
pub struct LinkMutator<'a> {
    style: &'a LinkStyle,
}

impl<'a> LinkMutator<'a> {
    pub fn new(style: &'a LinkStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &LinkStyle {
        self.style
    }

    /// Builds a link annotation in this mutator's style.
    pub fn make_link(&self, url: &str, attributes: &str) -> LinkAnnotation {
        LinkAnnotation::new(url, self.style, attributes)
    }

    /// Adds a link over `[start, end)`, or inserts one at a caret.
    ///
    /// An empty `anchor` uses the link itself as the visible text. When a
    /// range is given and the selected text already equals `anchor`, the
    /// text is left alone so its formatting survives.
    pub fn add_link(
        &self,
        doc: &mut Document,
        link: &str,
        anchor: &str,
        start: usize,
        end: usize,
    ) -> Result<(), LinkError> {
        doc.check_range(start, end)?;

        let clean_link = link.trim();
        let actual_anchor = if anchor.is_empty() { clean_link } else { anchor };
        let anchor_len = actual_anchor.chars().count();

        let mut tx = LinkTransaction::new();
        let mut real_start = start;
        let mut real_end;

        if start == end {
            // Only a non-empty insertion consumes the block's marker.
            let into_empty_block = anchor_len > 0 && doc.is_in_empty_block(start);
            tx = tx.insert(start, actual_anchor);
            real_end = start + anchor_len;

            if into_empty_block {
                log::debug!("Anchor lands in an empty block at {}, shifting by one", start);
                real_start = real_start.saturating_sub(1);
                real_end = real_end.saturating_sub(1);
            }
        } else {
            if doc.selected_text() != anchor {
                tx = tx.replace(start, end, actual_anchor);
            }
            real_end = start + anchor_len;
        }

        tx.install(real_start, real_end, self.make_link(clean_link, ""))
            .commit(doc)
    }

    /// Rewrites the link over `[start, end)`.
    ///
    /// Attributes of the link being edited are kept, with their `href`
    /// pointed at the new URL.
    pub fn edit_link(
        &self,
        doc: &mut Document,
        link: &str,
        anchor: &str,
        start: usize,
        end: usize,
    ) -> Result<(), LinkError> {
        doc.check_range(start, end)?;

        let clean_link = link.trim();
        let attributes = self.carried_attributes(doc, start, end, clean_link);

        let mut tx = LinkTransaction::new();
        let new_end = if anchor.is_empty() {
            tx = tx.replace(start, end, clean_link);
            start + clean_link.chars().count()
        } else {
            if doc.selected_text() != anchor {
                tx = tx.replace(start, end, anchor);
            }
            start + anchor.chars().count()
        };

        tx.install(start, new_end, self.make_link(clean_link, &attributes))
            .commit(doc)
    }

    /// Attributes of the link currently over `[start, end)`, retargeted.
    fn carried_attributes(&self, doc: &Document, start: usize, end: usize, url: &str) -> String {
        let Some(span) = doc.links().first_overlapping(start, end) else {
            return String::new();
        };
        let current = &span.link.attributes;
        if !current.is_empty() && !attributes::has_href(current) {
            log::warn!("Link attributes have no href to update: {}", current);
        }
        attributes::replace_href(current, url)
    }

    /// Replaces whatever links overlap `[start, end)` with one new link.
    ///
    /// Does nothing for an empty range. Text typed later at either edge
    /// stays outside the link.
    pub fn link_valid(
        &self,
        doc: &mut Document,
        link: &str,
        start: usize,
        end: usize,
        attributes: &str,
    ) -> Result<(), LinkError> {
        if start >= end {
            return Ok(());
        }
        LinkTransaction::new()
            .install(start, end, self.make_link(link, attributes))
            .commit(doc)
    }

    /// Removes every link overlapping `[start, end)`.
    pub fn link_invalid(&self, doc: &mut Document, start: usize, end: usize) -> Result<(), LinkError> {
        if start >= end {
            return Ok(());
        }
        LinkTransaction::new().clear(start, end).commit(doc)
    }
}
