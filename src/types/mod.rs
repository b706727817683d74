//! Data types shared by the grid engine.

mod column;
mod position;
mod row;
mod value;

pub use column::*;
pub use position::*;
pub use row::*;
pub use value::*;
