//! # ObjList - Query and Mutation Engine for In-Memory Records
//!
//! ObjList manages caller-owned collections of schemaless records
//! (`Vec<Record>`). It looks records up by predicate, replaces, merges and
//! removes them in place, sorts collections and imposes an explicit order
//! on them.
//!
//! ## Key Features
//!
//! - **Predicates**: target records by identity, by one field, or by several fields at once
//! - **In-place mutation**: mutators return the very collection handle they were given
//! - **All or nothing**: a failing mutator leaves the collection untouched
//! - **Ordering**: stable sort with numeric-aware, case-insensitive comparison
//! - **Binding**: bind a collection once and call every operation without it
//! - **Clean API**: PIMPL pattern, every clone of an engine shares its configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use objlist::obj_list::ObjList;
//! use objlist::record;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ObjList::new();
//! let mut users = vec![
//!     record! { id: 2, username: "Antonette" },
//!     record! { id: 1, username: "Bret" },
//! ];
//!
//! // read
//! let bret = engine.get(&users, 1)?;
//! assert_eq!(bret.unwrap().get("username")?, "Bret".into());
//!
//! // write in place
//! engine.update_properties(&mut users, &record! { username: "Bret2" }, 1)?;
//! engine.sort(&mut users, "id")?;
//! assert_eq!(users[0].get("username")?, "Bret2".into());
//!
//! // bind once, call many times
//! let mut bound = engine.bind(&mut users);
//! bound.remove(2)?;
//! assert!(!bound.contains(2)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Records and the operations over collections of them
//! - [`common`] - Common types, constants and utilities
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Predicates and record location
//! - [`obj_list`] - Engine exposing every operation
//! - [`obj_list_builder`] - Engine builder
//! - [`obj_list_config`] - Engine configuration

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod obj_list;
pub mod obj_list_builder;
pub mod obj_list_config;
