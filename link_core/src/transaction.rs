//! Staged link edits.
//!
//! A link operation touches both the text and the annotations. Staging
//! both in a [`LinkTransaction`] and committing them together means a
//! caller never sees new text with stale annotations: everything is
//! validated up front, then text is edited, then annotations follow.

use crate::annotation::LinkAnnotation;
use crate::document::Document;
use crate::error::LinkError;

/// A single text edit staged in a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Insert text at position.
    Insert { position: usize, text: String },
    /// Replace `[start, end)` with text.
    Replace {
        start: usize,
        end: usize,
        text: String,
    },
}

impl TextEdit {
    /// Returns the range of existing text this edit touches.
    pub fn range(&self) -> (usize, usize) {
        match self {
            TextEdit::Insert { position, .. } => (*position, *position),
            TextEdit::Replace { start, end, .. } => (*start, *end),
        }
    }

    /// Buffer length once this edit has been applied to `doc`.
    fn len_after(&self, doc: &Document) -> usize {
        match self {
            TextEdit::Insert { position, text } => {
                let mut len = doc.len_chars() + text.chars().count();
                if !text.is_empty() && doc.is_in_empty_block(*position) {
                    len -= 1;
                }
                len
            }
            TextEdit::Replace { start, end, text } => {
                doc.len_chars() - (end - start) + text.chars().count()
            }
        }
    }

    fn apply(&self, doc: &mut Document) -> Result<(), LinkError> {
        match self {
            TextEdit::Insert { position, text } => doc.insert(*position, text),
            TextEdit::Replace { start, end, text } => doc.replace(*start, *end, text),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingLink {
    start: usize,
    end: usize,
    link: LinkAnnotation,
}

/// Text edit plus annotation changes, applied as one step.
///
/// Ranges given to [`clear`](Self::clear) and [`install`](Self::install)
/// are in post-edit coordinates.
#[derive(Debug, Clone, Default)]
pub struct LinkTransaction {
    edit: Option<TextEdit>,
    clear: Option<(usize, usize)>,
    install: Option<PendingLink>,
}

impl LinkTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages an insertion.
    pub fn insert(self, position: usize, text: impl Into<String>) -> Self {
        self.edit(TextEdit::Insert {
            position,
            text: text.into(),
        })
    }

    /// Stages a replacement.
    pub fn replace(self, start: usize, end: usize, text: impl Into<String>) -> Self {
        self.edit(TextEdit::Replace {
            start,
            end,
            text: text.into(),
        })
    }

    /// Stages the text edit, replacing any edit staged before.
    pub fn edit(mut self, edit: TextEdit) -> Self {
        self.edit = Some(edit);
        self
    }

    /// Stages removal of every annotation overlapping `[start, end)`.
    pub fn clear(mut self, start: usize, end: usize) -> Self {
        self.clear = Some((start, end));
        self
    }

    /// Stages a link over `[start, end)`. Empty ranges install nothing.
    pub fn install(mut self, start: usize, end: usize, link: LinkAnnotation) -> Self {
        self.install = Some(PendingLink { start, end, link });
        self
    }

    /// Validates and applies the staged changes to `doc`.
    ///
    /// Nothing is touched unless every staged range fits the buffer.
    pub fn commit(self, doc: &mut Document) -> Result<(), LinkError> {
        let len = match &self.edit {
            Some(edit) => {
                let (start, end) = edit.range();
                doc.check_range(start, end)?;
                edit.len_after(doc)
            }
            None => doc.len_chars(),
        };
        let staged = self
            .clear
            .into_iter()
            .chain(self.install.as_ref().map(|p| (p.start, p.end)));
        for (start, end) in staged {
            if start < end && end > len {
                return Err(LinkError::OutOfBounds { start, end, len });
            }
        }

        if let Some(edit) = &self.edit {
            edit.apply(doc)?;
        }

        if let Some((start, end)) = self.clear {
            if start < end {
                let removed = doc.remove_links(start, end);
                log::debug!("Removed {} link(s) over {}..{}", removed.len(), start, end);
            }
        }

        if let Some(PendingLink { start, end, link }) = self.install {
            if start < end {
                doc.remove_links(start, end);
                log::debug!("Installing link {} over {}..{}", link.url, start, end);
                doc.install_link(start, end, link);
                doc.collapse_selection_to(end);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::LinkStyle;
    use crate::document::BlockKind;

    fn link(url: &str) -> LinkAnnotation {
        LinkAnnotation::new(url, &LinkStyle::default(), "")
    }

    #[test]
    fn test_commit_edit_then_install() {
        let mut doc = Document::from_str("go to site");
        LinkTransaction::new()
            .replace(6, 10, "example")
            .install(6, 13, link("http://example.com"))
            .commit(&mut doc)
            .unwrap();

        assert_eq!(doc.buffer().to_string(), "go to example");
        let span = doc.links().iter().next().unwrap();
        assert_eq!((span.start, span.end), (6, 13));
        assert_eq!(doc.selection().range(), (13, 13));
    }

    #[test]
    fn test_invalid_install_leaves_document_untouched() {
        let mut doc = Document::from_str("abc");
        let err = LinkTransaction::new()
            .insert(3, "def")
            .install(0, 10, link("http://a"))
            .commit(&mut doc)
            .unwrap_err();

        assert_eq!(err, LinkError::OutOfBounds { start: 0, end: 10, len: 6 });
        assert_eq!(doc.buffer().to_string(), "abc");
        assert!(doc.links().is_empty());
    }

    #[test]
    fn test_invalid_edit_is_rejected() {
        let mut doc = Document::from_str("abc");
        let err = LinkTransaction::new()
            .replace(2, 9, "x")
            .commit(&mut doc)
            .unwrap_err();
        assert_eq!(err, LinkError::OutOfBounds { start: 2, end: 9, len: 3 });
    }

    #[test]
    fn test_empty_install_is_noop() {
        let mut doc = Document::from_str("abc");
        doc.set_selection(0, 3);
        LinkTransaction::new()
            .install(2, 2, link("http://a"))
            .commit(&mut doc)
            .unwrap();
        assert!(doc.links().is_empty());
        assert_eq!(doc.selection().range(), (0, 3));
    }

    #[test]
    fn test_len_after_accounts_for_marker() {
        let mut doc = Document::from_str("x\n");
        doc.push_empty_block(BlockKind::Quote);
        let edit = TextEdit::Insert {
            position: 3,
            text: "abcd".into(),
        };
        assert_eq!(edit.len_after(&doc), 6);
        edit.apply(&mut doc).unwrap();
        assert_eq!(doc.len_chars(), 6);
    }

    #[test]
    fn test_clear_removes_overlapping() {
        let mut doc = Document::from_str("one two three");
        doc.install_link(0, 3, link("http://1"));
        doc.install_link(4, 7, link("http://2"));
        LinkTransaction::new().clear(2, 5).commit(&mut doc).unwrap();
        assert!(doc.links().is_empty());
    }
}
