pub mod dimensions;
pub mod ranges;
