//! Records and the operations over collections of them.
//!
//! A collection is a caller-owned `Vec<Record>`. Its order is meaningful:
//! lookups return the first match in collection order, and sorting is
//! stable.
//!
//! # Records
//!
//! A [Record] is a key-value map where keys are strings and values are
//! [Value](crate::common::Value)s. Records support nested fields using a
//! configurable separator (default: ".").
//!
//! ```rust
//! use objlist::collection::Record;
//!
//! let mut record = Record::new();
//! record.put("name", "Alice").unwrap();
//! record.put("address.city", "New York").unwrap();
//! assert_eq!(record.get("address.city").unwrap(), "New York".into());
//! ```
//!
//! # Bound collections
//!
//! [BoundList] ties an engine to one collection, so that every operation
//! can be called without passing the collection again.

mod bound_list;
pub(crate) mod operation;
mod record;

pub use bound_list::*;
pub use operation::SortSpec;
pub use record::*;
