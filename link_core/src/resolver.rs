//! Read-only link queries.
//!
//! These reconcile a caller's selection with the boundaries of the link
//! annotations already in the document. When a selection spills past the
//! link it touches, the selection wins: it is treated as plain text.

use crate::clipboard::{ClipboardText, ClipboardUrlSource};
use crate::document::Document;
use crate::error::LinkError;

/// URL and visible text for a "link" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedLink {
    pub url: String,
    /// Empty when the visible text is just the URL itself.
    pub anchor: String,
}

/// Link lookups over a document.
#[derive(Clone, Copy)]
pub struct LinkResolver<'a> {
    doc: &'a Document,
}

impl<'a> LinkResolver<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    /// Returns true if any link overlaps `[start, end)`.
    pub fn is_url_selected(&self, start: usize, end: usize) -> bool {
        self.doc.links().first_overlapping(start, end).is_some()
    }

    /// Works out the URL and anchor text to offer for a selection.
    ///
    /// With no link under the selection, the clipboard URL and the selected
    /// text are offered as-is. With a link, its URL and text are offered,
    /// unless the selection reaches outside it.
    pub fn selected_url_with_anchor(
        &self,
        start: usize,
        end: usize,
        selected_text: &str,
        clipboard_url: &str,
    ) -> SelectedLink {
        let Some(span) = self.doc.links().first_overlapping(start, end) else {
            return SelectedLink {
                url: clipboard_url.to_string(),
                anchor: if start == end {
                    String::new()
                } else {
                    selected_text.to_string()
                },
            };
        };

        log::trace!("Selection {}..{} touches link {}..{}", start, end, span.start, span.end);

        let mut selected = if start < span.start || end > span.end {
            SelectedLink {
                url: String::new(),
                anchor: selected_text.to_string(),
            }
        } else {
            SelectedLink {
                url: span.link.url.clone(),
                anchor: self.doc.text(span.start, span.end).unwrap_or_default(),
            }
        };

        if selected.anchor == selected.url {
            selected.anchor.clear();
        }
        selected
    }

    /// Same as [`selected_url_with_anchor`](Self::selected_url_with_anchor)
    /// for the document's own selection.
    ///
    /// The clipboard is only read when no link is selected.
    pub fn current_url_with_anchor<C: ClipboardText>(
        &self,
        clipboard: &mut ClipboardUrlSource<C>,
    ) -> SelectedLink {
        let (start, end) = self.doc.selection().range();
        let clipboard_url = if self.is_url_selected(start, end) {
            String::new()
        } else {
            clipboard.url()
        };
        self.selected_url_with_anchor(start, end, &self.doc.selected_text(), &clipboard_url)
    }

    /// Returns the bounds of the link under `[start, end)`.
    ///
    /// If the selection reaches outside that link the selection itself is
    /// returned. Callers should check [`is_url_selected`](Self::is_url_selected)
    /// first; with no link this fails with [`LinkError::NotFound`].
    pub fn url_span_bounds(&self, start: usize, end: usize) -> Result<(usize, usize), LinkError> {
        let span = self
            .doc
            .links()
            .first_overlapping(start, end)
            .ok_or(LinkError::NotFound { start, end })?;

        if start < span.start || end > span.end {
            return Ok((start, end));
        }
        Ok((span.start, span.end))
    }

    /// Returns true if links cover `[start, end)` completely.
    ///
    /// For a caret (`start == end`) both neighbouring characters must be
    /// linked, possibly by different links. For a range every character
    /// must be covered by some link.
    pub fn contain_link(&self, start: usize, end: usize) -> bool {
        if start > end {
            return false;
        }

        let links = self.doc.links();
        if start == end {
            if start == 0 || start + 1 > self.doc.len_chars() {
                return false;
            }
            let before = links.first_overlapping(start - 1, start).is_some();
            let after = links.first_overlapping(start, start + 1).is_some();
            return before && after;
        }

        (start..end).all(|offset| links.covers(offset))
    }
}

impl Document {
    /// Returns a link resolver over this document.
    pub fn resolver(&self) -> LinkResolver<'_> {
        LinkResolver::new(self)
    }
}
