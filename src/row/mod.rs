mod layout;
mod row;

pub use layout::{LayoutColumn, RowLayout, RowLayoutBuilder};
pub use row::{Row, RowBuilder};
