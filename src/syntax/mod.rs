//! Syntax highlighting module
//!
//! Provides table-driven lexical highlighting with:
//! - Language detection from filename patterns
//! - A two-tier keyword table per language, canonicalized at startup
//! - A per-row scanner carrying block-comment state across rows
//!
//! The scanner works on a row's rendered (tab-expanded) text and assigns
//! one [`Highlight`] category per rendered character. Re-highlighting after
//! edits and the cross-row cascade live in [`crate::buffer`].

mod highlighter;
mod languages;

pub use highlighter::{is_punctuation, is_separator, scan_row, Highlight};
pub use languages::{
    HighlightFlags, Keyword, KeywordTier, LanguageProfile, Matcher, ProfileError, SyntaxRegistry,
};
