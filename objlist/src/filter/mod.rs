//! Predicate resolution and record location.
//!
//! A [Predicate] describes which record(s) an operation targets. It is
//! resolved once into [KeyValue] conditions, which the locator applies to
//! a collection to find matching positions.
//!
//! ```rust
//! use objlist::filter::{locate, Predicate};
//! use objlist::record;
//!
//! let users = vec![
//!     record! { id: 1, common: "abc" },
//!     record! { id: 2, common: "xyz" },
//! ];
//! let conditions = Predicate::from(("common", "xyz")).conditions("id").unwrap();
//! assert_eq!(locate(&users, &conditions, ".").unwrap(), Some(1));
//! ```

mod locator;
mod predicate;

pub use locator::*;
pub use predicate::*;
