mod numeric;
mod type_utils;

pub use numeric::*;
pub use type_utils::*;
