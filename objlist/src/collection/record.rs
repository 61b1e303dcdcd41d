use im::OrdMap;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::common::{Value, DEFAULT_FIELD_SEPARATOR};
use crate::errors::{ErrorKind, ObjListError, ObjListResult};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

type FieldVec = SmallVec<[String; 8]>;

/// One element of a managed collection: an open mapping from field name to
/// [Value].
///
/// Records have no fixed schema. Any record may carry the identity field
/// (`id` unless configured otherwise) used to resolve bare identity
/// predicates.
///
/// Field names may address embedded fields using a field separator
/// (`.` for the plain accessors). For a record `{"address": {"city": "Paris"}}`
/// the call `record.get("address.city")` yields `"Paris"`, and
/// `record.get("tags.0")` yields the first element of an array field. A
/// top-level key that literally contains the separator is always found
/// first. The `*_separated` variants take the separator explicitly; an
/// engine passes its configured one.
///
/// ## Persistent storage
///
/// Fields live in an `im::OrdMap`, so cloning a record is O(1) and every
/// clone is independent of the original.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Record {
    data: OrdMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Record {
            data: OrdMap::new(),
        }
    }

    /// Checks if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified [Value] with the specified field.
    ///
    /// Embedded paths create the intermediate records they need:
    ///
    /// ```rust
    /// use objlist::collection::Record;
    ///
    /// let mut record = Record::new();
    /// record.put("address.city", "Paris").unwrap();
    /// assert_eq!(record.get("address.city").unwrap(), "Paris".into());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the field name (or one of its segments) is empty.
    pub fn put<'a, T: Into<Value>>(
        &mut self,
        key: impl Into<Cow<'a, str>>,
        value: T,
    ) -> ObjListResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("Record does not support empty field name");
            return Err(ObjListError::new(
                "Record does not support empty field name",
                ErrorKind::InvalidFieldName,
            ));
        }

        let value = value.into();
        if key.contains(DEFAULT_FIELD_SEPARATOR) {
            let splits: Vec<&str> = key.split(DEFAULT_FIELD_SEPARATOR).collect();
            self.deep_put(&splits, value)
        } else {
            self.data.insert(key.into_owned(), value);
            Ok(())
        }
    }

    /// Returns the value of a field, or [Value::Null] if the record has no
    /// such field. An array position past the end of the array is a missing
    /// field as well.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded path contains an empty segment or a
    /// negative array index.
    pub fn get(&self, key: &str) -> ObjListResult<Value> {
        self.get_separated(key, DEFAULT_FIELD_SEPARATOR)
    }

    /// Same as [Record::get], with embedded paths split on `separator`.
    pub fn get_separated(&self, key: &str, separator: &str) -> ObjListResult<Value> {
        match self.data.get(key) {
            Some(value) => Ok(value.clone()),
            // only scan embedded fields when the top level misses
            None if is_embedded(key, separator) => self.get_by_embedded_key(key, separator),
            None => Ok(Value::Null),
        }
    }

    /// Retrieves all field paths (top level and embedded) of this record.
    pub fn fields(&self) -> FieldVec {
        self.get_fields_internal("")
    }

    /// Removes a field. Removing a missing field is not an error.
    pub fn remove(&mut self, key: &str) -> ObjListResult<()> {
        self.remove_separated(key, DEFAULT_FIELD_SEPARATOR)
    }

    /// Same as [Record::remove], with embedded paths split on `separator`.
    pub fn remove_separated(&mut self, key: &str, separator: &str) -> ObjListResult<()> {
        if self.data.contains_key(key) || !is_embedded(key, separator) {
            self.data.remove(key);
            Ok(())
        } else {
            let splits: Vec<&str> = key.split(separator).collect();
            self.deep_remove(&splits)
        }
    }

    /// Returns a copy of this record without the named fields, splitting
    /// embedded paths on `separator`.
    pub fn without_fields<S: AsRef<str>>(
        &self,
        fields: &[S],
        separator: &str,
    ) -> ObjListResult<Record> {
        let mut copy = self.clone();
        for field in fields {
            copy.remove_separated(field.as_ref(), separator)?;
        }
        Ok(copy)
    }

    /// Returns the number of top-level fields.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Shallow-overlays another record onto this one.
    ///
    /// Every top-level field of `other` replaces the field of the same name
    /// here; fields absent from `other` are preserved. Nested records are
    /// replaced, not merged.
    ///
    /// ```rust
    /// use objlist::record;
    ///
    /// let mut user = record! { id: 1, name: "Ann", role: "dev" };
    /// user.merge(&record! { role: "lead" });
    /// assert_eq!(user, record! { id: 1, name: "Ann", role: "lead" });
    /// ```
    pub fn merge(&mut self, other: &Record) {
        for (key, value) in other.data.iter() {
            self.data.insert(key.clone(), value.clone());
        }
    }

    /// Checks if a top level key exists in the record.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Checks if a top level or embedded field exists in the record.
    pub fn contains_field(&self, field: &str) -> bool {
        self.contains_key(field) || self.fields().iter().any(|f| f == field)
    }

    /// Copies the top-level fields into a [BTreeMap].
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Iterates over the top-level fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> + '_ {
        self.data.iter()
    }

    fn get_fields_internal(&self, prefix: &str) -> FieldVec {
        let mut fields = FieldVec::new();

        for (key, value) in self.data.iter() {
            if key.is_empty() {
                continue;
            }

            let field = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}{}{}", prefix, DEFAULT_FIELD_SEPARATOR, key)
            };

            if let Value::Record(record) = value {
                fields.append(&mut record.get_fields_internal(&field));
            } else {
                fields.push(field);
            }
        }
        fields
    }

    fn deep_put(&mut self, splits: &[&str], value: Value) -> ObjListResult<()> {
        let key = match splits.first() {
            Some(key) if !key.is_empty() => *key,
            _ => {
                log::error!("Record does not support empty embedded field name");
                return Err(ObjListError::new(
                    "Record does not support empty embedded field name",
                    ErrorKind::InvalidFieldName,
                ));
            }
        };

        if splits.len() == 1 {
            self.data.insert(key.to_string(), value);
            return Ok(());
        }

        let mut nested = match self.data.get(key) {
            Some(Value::Record(record)) => record.clone(),
            _ => Record::new(),
        };
        nested.deep_put(&splits[1..], value)?;
        self.data.insert(key.to_string(), Value::Record(nested));
        Ok(())
    }

    fn deep_remove(&mut self, splits: &[&str]) -> ObjListResult<()> {
        let key = match splits.first() {
            Some(key) if !key.is_empty() => *key,
            _ => {
                log::error!("Record does not support empty embedded field name");
                return Err(ObjListError::new(
                    "Record does not support empty embedded field name",
                    ErrorKind::InvalidFieldName,
                ));
            }
        };

        if splits.len() == 1 {
            self.data.remove(key);
            return Ok(());
        }

        match self.data.get(key) {
            Some(Value::Record(record)) => {
                let mut nested = record.clone();
                nested.deep_remove(&splits[1..])?;
                if nested.is_empty() {
                    // drop the emptied parent as well
                    self.data.remove(key);
                } else {
                    self.data.insert(key.to_string(), Value::Record(nested));
                }
                Ok(())
            }
            Some(Value::Array(array)) => {
                let index = match array_index(splits[1], array.len())? {
                    Some(index) => index,
                    // no element at that position, nothing to remove
                    None => return Ok(()),
                };
                let mut items = array.clone();
                let nested = match (&items[index], splits.len() > 2) {
                    (Value::Record(record), true) => Some(record.clone()),
                    _ => None,
                };
                match nested {
                    Some(mut nested) => {
                        nested.deep_remove(&splits[2..])?;
                        if nested.is_empty() {
                            items.remove(index);
                        } else {
                            items[index] = Value::Record(nested);
                        }
                    }
                    None => {
                        items.remove(index);
                    }
                }
                self.data.insert(key.to_string(), Value::Array(items));
                Ok(())
            }
            // nothing embedded under this key
            _ => Ok(()),
        }
    }

    fn get_by_embedded_key(&self, key: &str, separator: &str) -> ObjListResult<Value> {
        let splits: Vec<&str> = key.split(separator).collect();

        match splits.first() {
            Some(first) if !first.is_empty() => {
                Self::recursive_get(self.data.get(*first), &splits[1..])
            }
            _ => {
                log::error!("Record does not support empty embedded field name");
                Err(ObjListError::new(
                    "Record does not support empty embedded field name",
                    ErrorKind::InvalidFieldName,
                ))
            }
        }
    }

    fn recursive_get(value: Option<&Value>, splits: &[&str]) -> ObjListResult<Value> {
        let value = match value {
            None => return Ok(Value::Null),
            Some(v) => v,
        };

        let key = match splits.first() {
            None => return Ok(value.clone()),
            Some(key) => *key,
        };

        if key.is_empty() {
            log::error!("Record does not support empty embedded field name");
            return Err(ObjListError::new(
                "Record does not support empty embedded field name",
                ErrorKind::InvalidFieldName,
            ));
        }

        match value {
            Value::Record(record) => Self::recursive_get(record.data.get(key), &splits[1..]),
            Value::Array(array) => {
                if key.parse::<isize>().is_ok() {
                    let item = array_index(key, array.len())?.map(|index| &array[index]);
                    Self::recursive_get(item, &splits[1..])
                } else {
                    // a non-numeric segment applies to every element
                    Self::decompose(array, splits)
                }
            }
            _ => Ok(Value::Null),
        }
    }

    fn decompose(array: &[Value], splits: &[&str]) -> ObjListResult<Value> {
        let mut items: Vec<Value> = Vec::with_capacity(array.len());

        for item in array {
            match Self::recursive_get(Some(item), splits)? {
                Value::Array(values) => items.extend(values),
                value => items.push(value),
            }
        }
        Ok(Value::Array(items.into_iter().unique().collect()))
    }
}

fn is_embedded(key: &str, separator: &str) -> bool {
    !separator.is_empty() && key.contains(separator)
}

/// Resolves an array index segment; `None` when the array is too short.
fn array_index(segment: &str, len: usize) -> ObjListResult<Option<usize>> {
    match segment.parse::<isize>() {
        Ok(index) if index >= 0 => Ok(Some(index as usize).filter(|index| *index < len)),
        _ => {
            log::error!("Invalid array index {} to access array inside a record", segment);
            Err(ObjListError::new(
                &format!("Invalid array index {} to access array inside a record", segment),
                ErrorKind::ValidationError,
            ))
        }
    }
}

impl Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\": {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            data: iter.into_iter().collect(),
        }
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Record] with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use objlist::record;
///
/// let empty = record!{};
///
/// let user = record!{
///     id: 1,
///     username: "Bret",
///     address: {
///         city: "Gwenborough",
///         tags: ["home", "primary"]
///     },
///     score: (40 + 2)
/// };
/// assert_eq!(user.get("address.city").unwrap(), "Gwenborough".into());
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::collection::Record::new()
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::record_value;

            let mut record = $crate::collection::Record::new();
            $(
                record
                    .put(
                        $crate::collection::normalize(stringify!($key)),
                        $crate::record_value!($value),
                    )
                    .expect(&format!("Failed to put value {} in record", stringify!($value)));
            )*
            record
        }
    };
}

/// Helper macro to convert values for the record! macro.
#[macro_export]
macro_rules! record_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Record($crate::record!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::record_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
