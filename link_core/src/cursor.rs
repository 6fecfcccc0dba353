//! Selection handling.

/// A text selection with an anchor and a cursor position.
/// When anchor == cursor, there is no active selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// The anchor point (where selection started).
    pub anchor: usize,
    /// The cursor position (where selection ends / caret is).
    pub cursor: usize,
}

impl Selection {
    /// Creates a new selection at the given position (no active selection).
    pub fn new(pos: usize) -> Self {
        Self {
            anchor: pos,
            cursor: pos,
        }
    }

    /// Creates a selection from anchor to cursor.
    pub fn with_range(anchor: usize, cursor: usize) -> Self {
        Self { anchor, cursor }
    }

    /// Returns the start and end of the selection (ordered).
    pub fn range(&self) -> (usize, usize) {
        if self.anchor <= self.cursor {
            (self.anchor, self.cursor)
        } else {
            (self.cursor, self.anchor)
        }
    }

    /// Clamps both ends into `0..=len`.
    pub fn clamp(&mut self, len: usize) {
        self.anchor = self.anchor.min(len);
        self.cursor = self.cursor.min(len);
    }
}

/// Receives caret updates requested by the link engine.
///
/// The host widget implements this to move its own caret after a link
/// has been installed.
pub trait SelectionListener {
    fn on_selection_changed(&mut self, start: usize, end: usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_new_is_collapsed() {
        let sel = Selection::new(4);
        assert_eq!(sel.range(), (4, 4));
    }

    #[test]
    fn test_backwards_selection_orders_range() {
        let sel = Selection::with_range(10, 5);
        assert_eq!(sel.range(), (5, 10));
    }

    #[test]
    fn test_clamp_to_length() {
        let mut sel = Selection::with_range(20, 2);
        sel.clamp(10);
        assert_eq!((sel.anchor, sel.cursor), (10, 2));
        assert_eq!(sel.range(), (2, 10));
    }
}
