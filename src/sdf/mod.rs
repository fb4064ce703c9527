//! SDF result records: splitting, property extraction, hit construction.

mod hit;
mod properties;
mod splitter;

pub use hit::{build_hit, parse_hits, truncate_chars};
pub use properties::{
    parse_score, record_name, record_property, record_property_as, required_property_as,
};
pub use splitter::{normalize_line_endings, split_records};
