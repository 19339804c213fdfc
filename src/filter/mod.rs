//! Filter expression trees
//!
//! This module provides the algebra behind an interactive filter editor:
//! classification of clauses, the canonical list of active filters,
//! consolidation, and the add/update/remove/toggle edits.

pub mod clause;
pub mod codec;
pub mod consolidate;
pub mod edit;
pub mod path;
pub mod toggle;

pub use clause::{
    Clause, Compound, Connective, FilterOptions, Predicate, SegmentRef, get_filter_options,
    set_filter_options,
};
pub use codec::{
    decode_filter, decode_filter_str, encode_filter, has_filter_options, is_compound_filter,
    is_field_filter, is_segment_filter,
};
pub use consolidate::{consolidate, flatten};
pub use edit::{
    FilterEditor, add_filter, can_add_filter, clear_filters, get_filters, remove_filter,
    update_filter,
};
pub use path::filter_paths;
pub use toggle::toggle_compound_filter_operator;
