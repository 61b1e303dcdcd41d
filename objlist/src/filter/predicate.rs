use indexmap::IndexMap;
use std::fmt::Display;

use crate::collection::Record;
use crate::common::Value;
use crate::errors::{ErrorKind, ObjListError, ObjListResult};

/// Describes which record(s) of a collection an operation targets.
///
/// Every operation accepts `impl Into<Predicate>`, so the shape of the
/// argument picks the variant once, up front:
///
/// * a bare scalar (`3`, `"abc"`, `true`) becomes [Predicate::ByIdentity];
/// * a `(field, value)` tuple becomes [Predicate::ByField];
/// * a [Record] or an [IndexMap] becomes [Predicate::ByFields].
///
/// ```rust
/// use objlist::filter::Predicate;
/// use objlist::record;
///
/// assert_eq!(Predicate::from(3), Predicate::ByIdentity(3.into()));
/// assert_eq!(
///     Predicate::from(("username", "Bret")),
///     Predicate::ByField("username".to_string(), "Bret".into())
/// );
/// assert!(matches!(Predicate::from(record! { common: "abc" }), Predicate::ByFields(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact match on the identity field.
    ByIdentity(Value),
    /// Exact match on one named field.
    ByField(String, Value),
    /// Exact match on every listed field; unlisted fields are ignored.
    ByFields(IndexMap<String, Value>),
}

/// Canonical single-field form of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Value,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Checks whether the record's field strictly equals this value, with
    /// embedded paths split on `separator`.
    ///
    /// A missing field reads as [Value::Null], so a null value matches
    /// records that lack the field.
    #[inline]
    pub fn matches(&self, record: &Record, separator: &str) -> ObjListResult<bool> {
        Ok(record.get_separated(&self.key, separator)? == self.value)
    }
}

impl Display for KeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.key, self.value)
    }
}

impl Predicate {
    pub fn by_identity(value: impl Into<Value>) -> Self {
        Predicate::ByIdentity(value.into())
    }

    pub fn by_field(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::ByField(key.into(), value.into())
    }

    pub fn by_fields<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Predicate::ByFields(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a predicate from a key and an optional value.
    ///
    /// With a value, `key` names the field and the pair is taken literally.
    /// Without one, `key` itself is the identity value. A present value is
    /// always used, even when it is `0`, `false` or empty text.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::MalformedSpecification] when a value is given but
    /// `key` is not text.
    pub fn from_key_value(key: impl Into<Value>, value: Option<Value>) -> ObjListResult<Self> {
        let key = key.into();
        match value {
            None => Ok(Predicate::ByIdentity(key)),
            Some(value) => match key {
                Value::String(field) => Ok(Predicate::ByField(field, value)),
                other => {
                    log::error!("Field name must be text, found {}", other);
                    Err(ObjListError::new(
                        &format!("Field name must be text, found {}", other),
                        ErrorKind::MalformedSpecification,
                    ))
                }
            },
        }
    }

    /// Resolves the target of a record-bearing operation.
    ///
    /// An explicit target wins. Otherwise the record's own identity field
    /// identifies it.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::NotIdentifiable] when no target is given and the
    /// record has no identity field.
    pub fn for_record(
        record: &Record,
        target: Option<Predicate>,
        identity_field: &str,
        separator: &str,
    ) -> ObjListResult<Self> {
        if let Some(target) = target {
            return Ok(target);
        }

        let identity = record.get_separated(identity_field, separator)?;
        if identity.is_null() {
            log::error!("Record {} has no identity field '{}'", record, identity_field);
            return Err(ObjListError::new(
                &format!("Record has no identity field '{}'", identity_field),
                ErrorKind::NotIdentifiable,
            ));
        }
        Ok(Predicate::ByField(identity_field.to_string(), identity))
    }

    /// Resolves this predicate to its canonical single-field form.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::MalformedSpecification] for a multi-field
    /// predicate that does not list exactly one field.
    pub fn key_value(&self, identity_field: &str) -> ObjListResult<KeyValue> {
        let mut conditions = self.conditions(identity_field)?;
        if conditions.len() != 1 {
            log::error!("Expected a single field predicate, found {}", self);
            return Err(ObjListError::new(
                &format!("Expected a single field predicate, found {}", self),
                ErrorKind::MalformedSpecification,
            ));
        }
        Ok(conditions.remove(0))
    }

    /// Resolves this predicate to the conjunction of field conditions a
    /// record must satisfy, in the predicate's own field order.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::MalformedSpecification] for an empty multi-field
    /// predicate and [ErrorKind::InvalidFieldName] for an empty field name.
    pub fn conditions(&self, identity_field: &str) -> ObjListResult<Vec<KeyValue>> {
        let conditions = match self {
            Predicate::ByIdentity(value) => vec![KeyValue::new(identity_field, value.clone())],
            Predicate::ByField(key, value) => vec![KeyValue::new(key.clone(), value.clone())],
            Predicate::ByFields(fields) => {
                if fields.is_empty() {
                    log::error!("Multi-field predicate lists no fields");
                    return Err(ObjListError::new(
                        "Multi-field predicate lists no fields",
                        ErrorKind::MalformedSpecification,
                    ));
                }
                fields
                    .iter()
                    .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
                    .collect()
            }
        };

        if let Some(condition) = conditions.iter().find(|c| c.key.is_empty()) {
            log::error!("Predicate condition {} has an empty field name", condition);
            return Err(ObjListError::new(
                "Predicate field name cannot be empty",
                ErrorKind::InvalidFieldName,
            ));
        }
        Ok(conditions)
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::ByIdentity(value) => write!(f, "(identity == {})", value),
            Predicate::ByField(key, value) => write!(f, "({} == {})", key, value),
            Predicate::ByFields(fields) => {
                write!(f, "(")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, " && ")?;
                    }
                    write!(f, "{} == {}", key, value)?;
                }
                write!(f, ")")
            }
        }
    }
}

macro_rules! predicate_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Predicate {
                #[inline]
                fn from(value: $t) -> Self {
                    Predicate::ByIdentity(Value::from(value))
                }
            }
        )*
    };
}

predicate_from_scalar!(
    i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64, bool, &str, String, &String
);

/// Records become multi-field predicates; every other value is an identity.
impl From<Value> for Predicate {
    fn from(value: Value) -> Self {
        match value {
            Value::Record(record) => Predicate::from(record),
            other => Predicate::ByIdentity(other),
        }
    }
}

impl From<&Value> for Predicate {
    fn from(value: &Value) -> Self {
        Predicate::from(value.clone())
    }
}

/// The conditions follow the record's key order, which is alphabetical.
/// Use [Predicate::by_fields] or an [IndexMap] when the narrowing order
/// matters, e.g. to control which field error surfaces first.
impl From<Record> for Predicate {
    fn from(record: Record) -> Self {
        Predicate::ByFields(record.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

impl From<&Record> for Predicate {
    fn from(record: &Record) -> Self {
        Predicate::from(record.clone())
    }
}

impl From<IndexMap<String, Value>> for Predicate {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Predicate::ByFields(fields)
    }
}

impl<K, V> From<(K, V)> for Predicate
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from((key, value): (K, V)) -> Self {
        Predicate::ByField(key.into(), value.into())
    }
}

impl From<&Predicate> for Predicate {
    fn from(predicate: &Predicate) -> Self {
        predicate.clone()
    }
}
