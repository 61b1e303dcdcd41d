//! Configuration for record list engines.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::common::{atomic, Atomic, DEFAULT_FIELD_SEPARATOR, DEFAULT_IDENTITY_FIELD};
use crate::errors::{ErrorKind, ObjListError, ObjListResult};

/// Settings shared by an [ObjList](crate::obj_list::ObjList) engine and
/// every handle bound from it.
///
/// * identity field: the field a bare identity predicate resolves to
///   (default `id`), per engine;
/// * field separator: the separator of embedded field paths (default `.`),
///   per engine as well; the engine hands it to every
///   [Record](crate::collection::Record) lookup it makes.
///
/// Settings can only change until the configuration is handed to an
/// engine. Two engines never see each other's settings.
///
/// # Examples
///
/// ```rust
/// use objlist::obj_list_config::ObjListConfig;
///
/// let config = ObjListConfig::new();
/// config.set_identity_field("uuid").unwrap();
/// assert_eq!(config.identity_field(), "uuid");
/// ```
#[derive(Clone)]
pub struct ObjListConfig {
    inner: Arc<ObjListConfigInner>,
}

impl Default for ObjListConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjListConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        ObjListConfig {
            inner: Arc::new(ObjListConfigInner::new()),
        }
    }

    /// Returns the field a bare identity value resolves to.
    pub fn identity_field(&self) -> String {
        self.inner.identity_field()
    }

    /// Sets the field a bare identity value resolves to.
    ///
    /// # Errors
    ///
    /// Returns error if already initialized or if the field name is empty.
    pub fn set_identity_field(&self, field: &str) -> ObjListResult<()> {
        self.inner.set_identity_field(field)
    }

    /// Returns the current separator of embedded field paths.
    pub fn field_separator(&self) -> String {
        self.inner.field_separator()
    }

    /// Sets the separator of embedded field paths.
    ///
    /// # Errors
    ///
    /// Returns error if already initialized or if the separator is empty.
    pub fn set_field_separator(&self, separator: &str) -> ObjListResult<()> {
        self.inner.set_field_separator(separator)
    }

    /// Freezes the configuration. Later setter calls fail.
    pub(crate) fn initialize(&self) {
        self.inner.configured.store(true, Ordering::Relaxed);
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.configured.load(Ordering::Relaxed)
    }
}

struct ObjListConfigInner {
    identity_field: Atomic<String>,
    field_separator: Atomic<String>,
    configured: AtomicBool,
}

impl ObjListConfigInner {
    fn new() -> Self {
        ObjListConfigInner {
            identity_field: atomic(DEFAULT_IDENTITY_FIELD.to_string()),
            field_separator: atomic(DEFAULT_FIELD_SEPARATOR.to_string()),
            configured: AtomicBool::new(false),
        }
    }

    fn identity_field(&self) -> String {
        self.identity_field.read().clone()
    }

    fn set_identity_field(&self, field: &str) -> ObjListResult<()> {
        self.ensure_not_configured("Identity field")?;

        if field.is_empty() {
            log::error!("Identity field cannot be empty");
            return Err(ObjListError::new(
                "Identity field cannot be empty",
                ErrorKind::InvalidFieldName,
            ));
        }

        *self.identity_field.write() = field.to_string();
        Ok(())
    }

    fn field_separator(&self) -> String {
        self.field_separator.read().clone()
    }

    fn set_field_separator(&self, separator: &str) -> ObjListResult<()> {
        self.ensure_not_configured("Field separator")?;

        if separator.is_empty() {
            log::error!("Field separator cannot be empty");
            return Err(ObjListError::new(
                "Field separator cannot be empty",
                ErrorKind::InvalidOperation,
            ));
        }

        *self.field_separator.write() = separator.to_string();
        Ok(())
    }

    fn ensure_not_configured(&self, setting: &str) -> ObjListResult<()> {
        if self.configured.load(Ordering::Relaxed) {
            log::error!("{} cannot be changed after initialization", setting);
            return Err(ObjListError::new(
                &format!("{} cannot be changed after initialization", setting),
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }
}
