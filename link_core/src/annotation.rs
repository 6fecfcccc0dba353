//! Link annotations and the ordered store that tracks them.
//!
//! Annotations live beside the text, not inside it. Each one covers a
//! half-open character range `[start, end)` with exclusive-exclusive
//! boundaries: text typed exactly at either edge stays plain.

/// Presentation shared by every link annotation.
///
/// Built once from configuration and handed by reference to whatever
/// constructs annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStyle {
    /// ARGB color.
    pub color: u32,
    pub underline: bool,
}

impl LinkStyle {
    pub const DEFAULT_COLOR: u32 = 0xFF00_87BE;

    pub fn new(color: u32, underline: bool) -> Self {
        Self { color, underline }
    }
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COLOR, true)
    }
}

/// A hyperlink: destination, opaque markup attributes and style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAnnotation {
    pub url: String,
    /// Serialized `key="value"` pairs, e.g. `target="_blank" href="..."`.
    pub attributes: String,
    pub style: LinkStyle,
}

impl LinkAnnotation {
    pub fn new(url: impl Into<String>, style: &LinkStyle, attributes: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            attributes: attributes.into(),
            style: *style,
        }
    }
}

/// A link annotation attached to a range of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    pub start: usize,
    pub end: usize,
    pub link: LinkAnnotation,
}

impl LinkSpan {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Overlap test used by every span lookup.
    ///
    /// A caret (`start == end`) matches spans it touches, including their
    /// edges. A real range matches spans sharing at least one character.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        if start == end {
            self.start <= start && start <= self.end
        } else {
            self.start < end && self.end > start
        }
    }

    /// Returns true if the character at `offset` is inside this span.
    pub fn covers(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// All link annotations over one buffer, ordered by `(start, end)`.
///
/// "First" always means lowest start offset.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    spans: Vec<LinkSpan>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkSpan> {
        self.spans.iter()
    }

    /// Returns every span overlapping `[start, end)`, in order.
    pub fn overlapping(&self, start: usize, end: usize) -> impl Iterator<Item = &LinkSpan> {
        self.spans.iter().filter(move |s| s.overlaps(start, end))
    }

    /// Returns the lowest-start span overlapping `[start, end)`.
    pub fn first_overlapping(&self, start: usize, end: usize) -> Option<&LinkSpan> {
        self.overlapping(start, end).next()
    }

    /// Returns true if some span covers the character at `offset`.
    pub fn covers(&self, offset: usize) -> bool {
        self.spans
            .iter()
            .take_while(|s| s.start <= offset)
            .any(|s| s.covers(offset))
    }

    /// Attaches `link` to `[start, end)`. Empty or inverted ranges are ignored.
    pub(crate) fn insert(&mut self, start: usize, end: usize, link: LinkAnnotation) {
        if start >= end {
            return;
        }
        let idx = self
            .spans
            .partition_point(|s| (s.start, s.end) <= (start, end));
        self.spans.insert(idx, LinkSpan { start, end, link });
    }

    /// Removes every span overlapping `[start, end)` and returns them.
    pub(crate) fn remove_overlapping(&mut self, start: usize, end: usize) -> Vec<LinkSpan> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.spans)
            .into_iter()
            .partition(|s| s.overlaps(start, end));
        self.spans = kept;
        removed
    }

    /// Shifts spans for `len` characters inserted at `pos`.
    pub(crate) fn apply_insert(&mut self, pos: usize, len: usize) {
        if len == 0 {
            return;
        }
        for span in &mut self.spans {
            if span.start >= pos {
                span.start += len;
            }
            if span.end > pos {
                span.end += len;
            }
        }
    }

    /// Shifts spans for the removal of `[start, end)`, dropping any that
    /// lose all their text.
    pub(crate) fn apply_delete(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        for span in &mut self.spans {
            span.start = map_through_delete(span.start, start, end);
            span.end = map_through_delete(span.end, start, end);
        }
        self.spans.retain(|s| !s.is_empty());
    }
}

/// Maps an offset through the removal of `[start, end)`.
pub(crate) fn map_through_delete(offset: usize, start: usize, end: usize) -> usize {
    if offset <= start {
        offset
    } else if offset >= end {
        offset - (end - start)
    } else {
        start
    }
}
