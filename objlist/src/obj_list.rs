use crate::collection::operation::{ReadOperations, SortOperations, WriteOperations};
use crate::collection::{BoundList, Record, SortSpec};
use crate::errors::ObjListResult;
use crate::filter::Predicate;
use crate::obj_list_builder::ObjListBuilder;
use crate::obj_list_config::ObjListConfig;
use std::ops::Deref;
use std::sync::Arc;

/// The query and mutation engine for collections of records.
///
/// `ObjList` provides every operation over a caller-owned `Vec<Record>`:
/// - Accessors: [get](ObjList::get), [get_all](ObjList::get_all),
///   [contains](ObjList::contains)
/// - Mutators: [replace](ObjList::replace), [update](ObjList::update),
///   [remove](ObjList::remove), [remove_props](ObjList::remove_props),
///   [update_properties](ObjList::update_properties), [add](ObjList::add)
/// - Ordering: [sort](ObjList::sort), [order](ObjList::order)
/// - Binding: [bind](ObjList::bind)
///
/// Targets are anything convertible to a [Predicate]: a bare identity
/// value, a `(field, value)` pair, or a [Record] of fields that must all
/// match.
///
/// Mutators change the collection in place and hand back the very same
/// collection handle. A mutator that fails leaves the collection exactly
/// as it was.
///
/// `ObjList` uses the PIMPL (Pointer to Implementation) design pattern
/// internally. Clones are cheap and share the same configuration.
///
/// # Examples
///
/// ```rust
/// use objlist::obj_list::ObjList;
/// use objlist::record;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = ObjList::new();
/// let mut users = vec![
///     record! { id: 1, username: "Bret", common: "abc" },
///     record! { id: 2, username: "Antonette" },
///     record! { id: 3, username: "Samantha", common: "abc" },
/// ];
///
/// assert_eq!(engine.get_all(&users, record! { common: "abc" })?.len(), 2);
///
/// engine.update(&mut users, record! { id: 2, phone: "010-692-6593" })?;
/// engine.remove(&mut users, 1)?;
/// assert_eq!(users.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ObjList {
    inner: Arc<ObjListInner>,
}

impl Default for ObjList {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjList {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        ObjList::with_config(ObjListConfig::new())
    }

    /// Creates a new `ObjListBuilder` for configuring an engine.
    pub fn builder() -> ObjListBuilder {
        ObjListBuilder::new()
    }

    pub(crate) fn with_config(config: ObjListConfig) -> Self {
        config.initialize();
        ObjList {
            inner: Arc::new(ObjListInner::new(config)),
        }
    }

    /// Returns the configuration of this engine.
    pub fn config(&self) -> &ObjListConfig {
        &self.inner.config
    }

    /// Returns the first record matching the predicate, or `None`.
    ///
    /// The returned reference points into the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the predicate is malformed or a field path
    /// cannot be followed.
    pub fn get<'a>(
        &self,
        collection: &'a [Record],
        predicate: impl Into<Predicate>,
    ) -> ObjListResult<Option<&'a Record>> {
        self.read_operations.get(collection, &predicate.into())
    }

    /// Returns copies of every record matching the predicate, in
    /// collection order.
    pub fn get_all(
        &self,
        collection: &[Record],
        predicate: impl Into<Predicate>,
    ) -> ObjListResult<Vec<Record>> {
        self.read_operations.get_all(collection, &predicate.into())
    }

    /// Checks whether any record matches the predicate.
    pub fn contains(
        &self,
        collection: &[Record],
        predicate: impl Into<Predicate>,
    ) -> ObjListResult<bool> {
        self.read_operations.contains(collection, &predicate.into())
    }

    /// Returns the position of the first record matching the predicate.
    pub fn locate(
        &self,
        collection: &[Record],
        predicate: &Predicate,
    ) -> ObjListResult<Option<usize>> {
        self.read_operations.locate(collection, predicate)
    }

    /// Replaces the record sharing the identity of `record` with `record`.
    ///
    /// # Errors
    ///
    /// Returns [NotIdentifiable](crate::errors::ErrorKind::NotIdentifiable)
    /// if `record` has no identity field and
    /// [OutOfRange](crate::errors::ErrorKind::OutOfRange) if no record of
    /// the collection has that identity.
    pub fn replace<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.write_operations.replace(collection, record, None)
    }

    /// Replaces the first record matching `target` with `record`.
    pub fn replace_where<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
        target: impl Into<Predicate>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.write_operations
            .replace(collection, record, Some(target.into()))
    }

    /// Overlays the fields of `record` onto the record sharing its
    /// identity. Fields missing from `record` are kept.
    pub fn update<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.write_operations.update(collection, record, None)
    }

    /// Overlays the fields of `record` onto the first record matching
    /// `target`.
    pub fn update_where<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
        target: impl Into<Predicate>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.write_operations
            .update(collection, record, Some(target.into()))
    }

    /// Removes the first record matching `target`.
    ///
    /// # Errors
    ///
    /// Returns [OutOfRange](crate::errors::ErrorKind::OutOfRange) if no
    /// record matches.
    pub fn remove<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        target: impl Into<Predicate>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.write_operations.remove(collection, target.into())
    }

    /// Deletes the named fields from the first record matching `target`.
    pub fn remove_props<'a, S: AsRef<str>>(
        &self,
        collection: &'a mut Vec<Record>,
        props: &[S],
        target: impl Into<Predicate>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.write_operations
            .remove_props(collection, props, target.into())
    }

    /// Overlays `updates` onto the first record matching `target`.
    ///
    /// The merge happens in place; the returned handle is the collection
    /// itself, not a fresh copy.
    pub fn update_properties<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        updates: &Record,
        target: impl Into<Predicate>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.write_operations
            .update_properties(collection, updates, target.into())
    }

    /// Inserts `record` at the front of the collection, then sorts the
    /// whole collection when `sort` is given.
    ///
    /// If sorting fails the record is taken out again.
    pub fn add<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
        sort: Option<SortSpec>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.write_operations.add(collection, record, sort)
    }

    /// Sorts the collection in place.
    ///
    /// The sort is stable in both directions: records with equal keys keep
    /// their relative order. Values that read as numbers, including numeric
    /// text such as `"10"`, compare numerically; other values compare as
    /// lowercased text. Missing values come first, then numbers, then text.
    pub fn sort<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        spec: impl Into<SortSpec>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.sort_operations.sort(collection, &spec.into())
    }

    /// Builds a new sequence following `new_order`: one slot per entry,
    /// holding a copy of the first matching record or `None`.
    ///
    /// Bare identity entries are matched against the `key` field.
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
        self.sort_operations.order(collection, key, new_order)
    }

    /// Binds a collection to this engine, so that every operation can be
    /// called without it.
    ///
    /// ```rust
    /// use objlist::obj_list::ObjList;
    /// use objlist::record;
    ///
    /// let engine = ObjList::new();
    /// let mut users = vec![record! { id: 1 }, record! { id: 2 }];
    ///
    /// let mut bound = engine.bind(&mut users);
    /// bound.remove(1).unwrap();
    /// assert!(!bound.contains(1).unwrap());
    /// assert_eq!(users.len(), 1);
    /// ```
    pub fn bind<'a>(&self, collection: &'a mut Vec<Record>) -> BoundList<'a> {
        BoundList::new(self.clone(), collection)
    }
}

impl Deref for ObjList {
    type Target = Arc<ObjListInner>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[doc(hidden)]
pub struct ObjListInner {
    config: ObjListConfig,
    read_operations: ReadOperations,
    write_operations: WriteOperations,
    sort_operations: SortOperations,
}

impl ObjListInner {
    fn new(config: ObjListConfig) -> Self {
        let read_operations = ReadOperations::new(config.clone());
        let sort_operations = SortOperations::new(config.clone(), read_operations.clone());
        let write_operations = WriteOperations::new(
            config.clone(),
            read_operations.clone(),
            sort_operations.clone(),
        );

        ObjListInner {
            config,
            read_operations,
            write_operations,
            sort_operations,
        }
    }
}
