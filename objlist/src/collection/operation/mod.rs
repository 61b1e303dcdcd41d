mod read_operations;
mod sort_operations;
mod write_operations;

pub(crate) use read_operations::*;
pub(crate) use sort_operations::SortOperations;
pub use sort_operations::SortSpec;
pub(crate) use write_operations::*;
