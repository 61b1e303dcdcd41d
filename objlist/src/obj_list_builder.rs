use crate::errors::ObjListError;
use crate::{errors::ObjListResult, obj_list::ObjList, obj_list_config::ObjListConfig};

/// Builder for creating and configuring an [ObjList] engine.
///
/// `ObjListBuilder` provides a fluent API for configuring the engine before
/// it is built. Configuration errors are captured and reported by
/// [ObjListBuilder::build], so a chain of calls never has to stop midway.
///
/// # Examples
///
/// ```rust
/// use objlist::obj_list::ObjList;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // engine with default settings
/// let engine = ObjList::builder().build()?;
/// assert_eq!(engine.config().identity_field(), "id");
///
/// // engine resolving bare identities against `uuid`
/// let engine = ObjList::builder()
///     .identity_field("uuid")
///     .build()?;
/// assert_eq!(engine.config().identity_field(), "uuid");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ObjListBuilder {
    error: Option<ObjListError>,
    config: ObjListConfig,
}

impl ObjListBuilder {
    /// Creates a new `ObjListBuilder` with `id` as identity field and `.` as
    /// field separator.
    pub fn new() -> Self {
        ObjListBuilder {
            error: None,
            config: ObjListConfig::new(),
        }
    }

    /// Sets the field a bare identity value resolves to.
    ///
    /// If `identity_field` is empty, the error is captured and will be
    /// returned when calling `build()`.
    pub fn identity_field(mut self, identity_field: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_identity_field(identity_field) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Sets the separator of embedded field paths.
    ///
    /// The separator is used to reach nested fields of records. For example,
    /// with "." as separator, `record.get("address.city")` retrieves the
    /// `city` field inside a nested `address` record. The setting belongs to
    /// the engine being built and no other.
    ///
    /// If `field_separator` is empty, the error is captured and will be
    /// returned when calling `build()`.
    pub fn field_separator(mut self, field_separator: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_field_separator(field_separator) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Builds the engine, or returns the first configuration error.
    pub fn build(self) -> ObjListResult<ObjList> {
        if let Some(err) = self.error {
            log::error!("Failed to build engine: {}", err);
            return Err(err);
        }
        Ok(ObjList::with_config(self.config))
    }
}
