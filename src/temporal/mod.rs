mod packed;
mod parse;
mod value;

pub use packed::*;
pub use parse::TimeParseMode;
pub use value::TemporalValue;
