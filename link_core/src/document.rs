//! Editable document: text, block containers, link annotations and selection.

use crate::annotation::{map_through_delete, AnnotationStore, LinkAnnotation, LinkSpan};
use crate::buffer::{TextBuffer, EMPTY_BLOCK_MARKER};
use crate::cursor::{Selection, SelectionListener};
use crate::error::LinkError;
use std::io;
use std::path::Path;

/// Kind of structural block container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Quote,
    ListItem,
    Heading,
    Preformat,
}

/// A block container over `[start, end)`.
///
/// Blocks are inclusive at both edges: text typed at either edge joins
/// the block. Adjacent blocks are expected to be separated by a newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub start: usize,
    pub end: usize,
    pub kind: BlockKind,
}

impl BlockSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// The document the link engine works on.
///
/// Note: Does not derive Debug because the selection listener is a
/// boxed trait object.
pub struct Document {
    /// The text buffer.
    buffer: TextBuffer,
    /// Block containers, ordered by start offset.
    blocks: Vec<BlockSpan>,
    /// Link annotations.
    links: AnnotationStore,
    /// Current selection.
    selection: Selection,
    /// Host hook for caret updates.
    listener: Option<Box<dyn SelectionListener>>,
    /// Whether the text has changed since load.
    modified: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::from_buffer(TextBuffer::new())
    }

    /// Creates a document holding `text`.
    pub fn from_str(text: &str) -> Self {
        Self::from_buffer(TextBuffer::from_str(text))
    }

    pub fn from_buffer(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            blocks: Vec::new(),
            links: AnnotationStore::new(),
            selection: Selection::default(),
            listener: None,
            modified: false,
        }
    }

    /// Loads a document from a file.
    pub fn open_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let buffer = TextBuffer::from_file(path)?;
        log::debug!("Loaded {} chars from {}", buffer.len_chars(), path.display());
        Ok(Self::from_buffer(buffer))
    }

    /// Returns a reference to the buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns the link annotations.
    pub fn links(&self) -> &AnnotationStore {
        &self.links
    }

    /// Returns the block containers.
    pub fn blocks(&self) -> &[BlockSpan] {
        &self.blocks
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    /// Returns the text in `[start, end)`, or None if the range is invalid.
    pub fn text(&self, start: usize, end: usize) -> Option<String> {
        self.buffer.slice(start, end)
    }

    /// Returns whether the text has changed since load.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Checks that `[start, end)` is an ordered range inside the buffer.
    pub fn check_range(&self, start: usize, end: usize) -> Result<(), LinkError> {
        if start > end {
            return Err(LinkError::InvertedRange { start, end });
        }
        let len = self.len_chars();
        if end > len {
            return Err(LinkError::OutOfBounds { start, end, len });
        }
        Ok(())
    }

    // ==================== Selection ====================

    /// Returns the current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Sets the selection, clamped to the buffer.
    pub fn set_selection(&mut self, anchor: usize, cursor: usize) {
        self.selection = Selection::with_range(anchor, cursor);
        self.selection.clamp(self.len_chars());
    }

    /// Returns the selected text, empty when the selection is collapsed.
    pub fn selected_text(&self) -> String {
        let (start, end) = self.selection.range();
        self.text(start, end).unwrap_or_default()
    }

    /// Registers the host hook notified when the engine moves the caret.
    pub fn set_selection_listener(&mut self, listener: Box<dyn SelectionListener>) {
        self.listener = Some(listener);
    }

    /// Collapses the selection to `offset` and notifies the host.
    pub(crate) fn collapse_selection_to(&mut self, offset: usize) {
        self.selection = Selection::new(offset.min(self.len_chars()));
        if let Some(listener) = self.listener.as_mut() {
            listener.on_selection_changed(offset, offset);
        }
    }

    // ==================== Blocks ====================

    /// Registers a block container over `[start, end)`.
    pub fn add_block(&mut self, start: usize, end: usize, kind: BlockKind) -> Result<(), LinkError> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(());
        }
        let idx = self.blocks.partition_point(|b| b.start <= start);
        self.blocks.insert(idx, BlockSpan { start, end, kind });
        Ok(())
    }

    /// Appends an empty block (a lone marker) and returns its range.
    pub fn push_empty_block(&mut self, kind: BlockKind) -> (usize, usize) {
        let start = self.len_chars();
        let mut marker = [0u8; 4];
        self.buffer.insert(start, EMPTY_BLOCK_MARKER.encode_utf8(&mut marker));
        self.links.apply_insert(start, 1);
        self.blocks.push(BlockSpan {
            start,
            end: start + 1,
            kind,
        });
        self.modified = true;
        (start, start + 1)
    }

    /// Returns true if `offset` lies in a block whose only character is
    /// the empty-block marker.
    pub fn is_in_empty_block(&self, offset: usize) -> bool {
        self.empty_block_at(offset).is_some()
    }

    fn empty_block_at(&self, offset: usize) -> Option<BlockSpan> {
        self.blocks
            .iter()
            .find(|b| {
                b.contains(offset)
                    && b.len() == 1
                    && self.buffer.char_at(b.start) == Some(EMPTY_BLOCK_MARKER)
            })
            .copied()
    }

    // ==================== Text Editing ====================

    /// Inserts `text` at `offset`.
    ///
    /// Inserting into an empty block consumes its marker: the text takes
    /// the marker's place and everything after it ends up one character
    /// earlier than plain arithmetic suggests.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), LinkError> {
        self.check_range(offset, offset)?;
        if text.is_empty() {
            return Ok(());
        }

        let empty_block = self.empty_block_at(offset);
        let inserted = self.splice_insert(offset, text);

        if let Some(block) = empty_block {
            let marker = if offset == block.start {
                block.start + inserted
            } else {
                block.start
            };
            log::trace!("Consuming empty block marker at {}", marker);
            self.splice_delete(marker, marker + 1);
        }
        Ok(())
    }

    /// Deletes `[start, end)`.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<(), LinkError> {
        self.check_range(start, end)?;
        self.splice_delete(start, end);
        Ok(())
    }

    /// Replaces `[start, end)` with `text`.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<(), LinkError> {
        self.check_range(start, end)?;
        self.splice_delete(start, end);
        self.splice_insert(start, text);
        Ok(())
    }

    /// Inserts without bounds checks or marker handling; returns the
    /// number of characters inserted.
    fn splice_insert(&mut self, offset: usize, text: &str) -> usize {
        let len = text.chars().count();
        if len == 0 {
            return 0;
        }
        self.buffer.insert(offset, text);
        self.links.apply_insert(offset, len);
        for block in &mut self.blocks {
            if block.start > offset {
                block.start += len;
            }
            if block.end >= offset {
                block.end += len;
            }
        }
        if self.selection.anchor >= offset {
            self.selection.anchor += len;
        }
        if self.selection.cursor >= offset {
            self.selection.cursor += len;
        }
        self.modified = true;
        len
    }

    fn splice_delete(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        self.buffer.remove(start, end);
        self.links.apply_delete(start, end);
        for block in &mut self.blocks {
            block.start = map_through_delete(block.start, start, end);
            block.end = map_through_delete(block.end, start, end);
        }
        self.blocks.retain(|b| !b.is_empty());
        self.selection.anchor = map_through_delete(self.selection.anchor, start, end);
        self.selection.cursor = map_through_delete(self.selection.cursor, start, end);
        self.modified = true;
    }

    // ==================== Annotations ====================

    pub(crate) fn install_link(&mut self, start: usize, end: usize, link: LinkAnnotation) {
        self.links.insert(start, end, link);
    }

    pub(crate) fn remove_links(&mut self, start: usize, end: usize) -> Vec<LinkSpan> {
        self.links.remove_overlapping(start, end)
    }
}
