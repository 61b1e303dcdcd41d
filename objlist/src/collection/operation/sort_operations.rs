use super::read_operations::ReadOperations;
use crate::{
    collection::Record,
    common::{numeric_value, SortOrder, Value, SORT_ASC, SORT_DESC},
    errors::{ErrorKind, ObjListError, ObjListResult},
    filter::Predicate,
    obj_list_config::ObjListConfig,
};
use std::cmp::Ordering;
use std::fmt::Display;

/// Describes how a collection is sorted: one field and a direction.
///
/// ```rust
/// use objlist::collection::SortSpec;
/// use objlist::common::SortOrder;
/// use objlist::record;
///
/// assert_eq!(SortSpec::from("username").order, SortOrder::Ascending);
///
/// let spec = SortSpec::from_record(&record! { username: "DESC" }).unwrap();
/// assert_eq!(spec, SortSpec::new("username", SortOrder::Descending));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        SortSpec {
            field: field.into(),
            order,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        SortSpec::new(field, SortOrder::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        SortSpec::new(field, SortOrder::Descending)
    }

    /// Reads a single-entry `{field: direction}` specification.
    ///
    /// The text `"DESC"` selects descending order; any other direction
    /// value sorts ascending.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::MalformedSpecification] unless the record holds
    /// exactly one field.
    pub fn from_record(record: &Record) -> ObjListResult<Self> {
        let mut entries = record.iter();
        match (entries.next(), entries.next()) {
            (Some((field, direction)), None) => {
                let order = match direction.as_str() {
                    Some(SORT_DESC) => SortOrder::Descending,
                    Some(SORT_ASC) => SortOrder::Ascending,
                    _ => {
                        log::warn!(
                            "Unknown sort direction {} for field '{}', sorting ascending",
                            direction,
                            field
                        );
                        SortOrder::Ascending
                    }
                };
                Ok(SortSpec::new(field.clone(), order))
            }
            _ => {
                log::error!("Sort specification must hold exactly one field, found {}", record);
                Err(ObjListError::new(
                    &format!(
                        "Sort specification must hold exactly one field, found {}",
                        record.size()
                    ),
                    ErrorKind::MalformedSpecification,
                ))
            }
        }
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.order {
            SortOrder::Ascending => SORT_ASC,
            SortOrder::Descending => SORT_DESC,
        };
        write!(f, "{} {}", self.field, direction)
    }
}

impl From<&str> for SortSpec {
    fn from(field: &str) -> Self {
        SortSpec::ascending(field)
    }
}

impl From<String> for SortSpec {
    fn from(field: String) -> Self {
        SortSpec::ascending(field)
    }
}

impl From<&String> for SortSpec {
    fn from(field: &String) -> Self {
        SortSpec::ascending(field.clone())
    }
}

impl<S: Into<String>> From<(S, SortOrder)> for SortSpec {
    fn from((field, order): (S, SortOrder)) -> Self {
        SortSpec::new(field, order)
    }
}

impl From<&SortSpec> for SortSpec {
    fn from(spec: &SortSpec) -> Self {
        spec.clone()
    }
}

/// Comparable form of a field value.
///
/// Keys rank missing before numeric before text. Numeric keys compare by
/// value and text keys compare lowercased, which keeps the order total
/// over mixed columns.
#[derive(Debug, Clone)]
enum SortKey {
    Missing,
    Numeric(f64),
    Text(String),
}

impl SortKey {
    fn of(value: &Value) -> Self {
        if value.is_null() {
            return SortKey::Missing;
        }
        match numeric_value(value) {
            Some(number) => SortKey::Numeric(number),
            None => SortKey::Text(value.to_text().to_lowercase()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Numeric(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // numeric keys are always finite
            (SortKey::Numeric(a), SortKey::Numeric(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Sorting and explicit reordering of collections.
#[derive(Clone)]
pub(crate) struct SortOperations {
    config: ObjListConfig,
    read_operations: ReadOperations,
}

impl SortOperations {
    pub fn new(config: ObjListConfig, read_operations: ReadOperations) -> Self {
        Self {
            config,
            read_operations,
        }
    }

    /// Sorts the collection in place with a stable sort.
    ///
    /// A record without the field, or whose array is too short for an
    /// indexed path, sorts as missing. Every key is read before any record
    /// moves, so a failing field lookup leaves the collection as it was.
    pub fn sort<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        spec: &SortSpec,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        if spec.field.is_empty() {
            log::error!("Sort field cannot be empty");
            return Err(ObjListError::new(
                "Sort field cannot be empty",
                ErrorKind::InvalidFieldName,
            ));
        }

        let separator = self.config.field_separator();
        let keys = collection
            .iter()
            .map(|record| {
                record
                    .get_separated(&spec.field, &separator)
                    .map(|value| SortKey::of(&value))
            })
            .collect::<ObjListResult<Vec<_>>>()?;

        let mut keyed: Vec<(SortKey, Record)> =
            keys.into_iter().zip(collection.drain(..)).collect();
        keyed.sort_by(|(a, _), (b, _)| spec.order.apply(a.cmp(b)));
        collection.extend(keyed.into_iter().map(|(_, record)| record));

        log::debug!("Sorted {} record(s) by {}", collection.len(), spec);
        Ok(collection)
    }

    /// Builds a new sequence holding, for each entry of `new_order`, the
    /// first matching record of the collection or `None`.
    ///
    /// Bare identity entries resolve against `key` instead of the identity
    /// field.
    pub fn order<I, P>(
        &self,
        collection: &[Record],
        key: &str,
        new_order: I,
    ) -> ObjListResult<Vec<Option<Record>>>
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        if key.is_empty() {
            log::error!("Order key cannot be empty");
            return Err(ObjListError::new(
                "Order key cannot be empty",
                ErrorKind::InvalidFieldName,
            ));
        }

        let mut ordered = Vec::new();
        for entry in new_order {
            let predicate = match entry.into() {
                Predicate::ByIdentity(value) => Predicate::ByField(key.to_string(), value),
                other => other,
            };
            let record = self.read_operations.get(collection, &predicate)?;
            if record.is_none() {
                log::debug!("{} has no match, keeping an empty slot", predicate);
            }
            ordered.push(record.cloned());
        }
        Ok(ordered)
    }
}
