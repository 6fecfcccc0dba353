//! Linkspan Core - Hyperlink annotations over an editable text buffer.
//!
//! This crate tracks which ranges of a document are links, keeps them in
//! step with text edits, and answers boundary and coverage queries. It
//! has no dependencies on windowing, rendering or the system clipboard.

pub mod annotation;
pub mod attributes;
pub mod buffer;
pub mod clipboard;
pub mod config;
pub mod cursor;
pub mod document;
pub mod error;
pub mod mutator;
pub mod resolver;
pub mod transaction;

pub use annotation::{AnnotationStore, LinkAnnotation, LinkSpan, LinkStyle};
pub use buffer::{TextBuffer, EMPTY_BLOCK_MARKER};
pub use clipboard::{ClipboardText, ClipboardUrlSource, WebUrlPattern};
pub use config::{Config, ConfigError};
pub use cursor::{Selection, SelectionListener};
pub use document::{BlockKind, BlockSpan, Document};
pub use error::LinkError;
pub use mutator::LinkMutator;
pub use resolver::{LinkResolver, SelectedLink};
pub use transaction::{LinkTransaction, TextEdit};
