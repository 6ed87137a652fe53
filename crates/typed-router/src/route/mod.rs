/// Route module for file-based routing
///
/// Contains the segment grammar (`pattern`) and whole-path parsing
/// (`parser`). Both are pure: same input → same output.
pub mod parser;
pub mod pattern;

pub use parser::{parse, RoutePattern};
pub use pattern::{classify_segment, SegmentDescriptor};
