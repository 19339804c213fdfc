//! A Rust library for building, editing and normalizing boolean filter
//! expression trees, as used behind interactive filter editors.

pub mod config;
pub mod error;
pub mod filter;

// Re-export the most common types for easier use
// Core types
pub use config::FilterEditorConfig;
pub use error::{FilterError, Result};

// Tree types and codec
pub use filter::{Clause, Compound, Connective, FilterOptions, Predicate, SegmentRef};
pub use filter::{decode_filter, decode_filter_str, encode_filter};

// Editing operations
pub use filter::{
    FilterEditor, add_filter, can_add_filter, clear_filters, consolidate, filter_paths,
    get_filters, remove_filter, toggle_compound_filter_operator, update_filter,
};
