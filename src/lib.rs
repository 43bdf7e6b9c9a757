//! stanza - line buffer and syntax highlighting core
//!
//! This crate is the text engine underlying a terminal line editor: an
//! index-addressable buffer of rows, a tab-expanded render form per row,
//! and a table-driven lexical highlighter that carries open-block-comment
//! state across row boundaries.
//!
//! Terminal setup, key dispatch, screen painting, file I/O, and search
//! locate are external collaborators; they drive this crate through
//! [`EditorSession`].

pub mod buffer;
pub mod config;
pub mod config_paths;
pub mod session;
pub mod syntax;
pub mod trace;

// Re-export commonly used types
pub use buffer::{Buffer, Row, TAB_STOP};
pub use config::EditorConfig;
pub use session::EditorSession;
pub use syntax::{Highlight, LanguageProfile, ProfileError, SyntaxRegistry};
