mod buffer;
mod charset;
mod column_codec;
mod float;
mod int;
mod registry;
mod string;
mod value;

pub use buffer::*;
pub use charset::*;
pub use column_codec::*;
pub use float::*;
pub use int::*;
pub use registry::*;
pub use string::*;
pub use value::*;
