use super::{read_operations::ReadOperations, sort_operations::SortOperations, SortSpec};
use crate::{
    collection::Record,
    errors::{ErrorKind, ObjListError, ObjListResult},
    filter::Predicate,
    obj_list_config::ObjListConfig,
};
use std::sync::Arc;

/// In-place mutations of a collection.
///
/// Every mutation validates its input and locates its target before it
/// touches the collection, and returns the same collection handle it was
/// given.
#[derive(Clone)]
pub(crate) struct WriteOperations {
    inner: Arc<WriteOperationsInner>,
}

impl WriteOperations {
    pub fn new(
        config: ObjListConfig,
        read_operations: ReadOperations,
        sort_operations: SortOperations,
    ) -> Self {
        Self {
            inner: Arc::new(WriteOperationsInner::new(config, read_operations, sort_operations)),
        }
    }

    /// Overwrites the record located by `target`, or by the record's own
    /// identity when no target is given.
    pub fn replace<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
        target: Option<Predicate>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.inner.replace(collection, record, target)
    }

    /// Shallow-merges `record` onto the record located by `target`, or by
    /// the record's own identity when no target is given.
    pub fn update<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
        target: Option<Predicate>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.inner.update(collection, record, target)
    }

    /// Removes exactly one record.
    pub fn remove<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        target: Predicate,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.inner.remove(collection, target)
    }

    /// Deletes the named fields from the located record.
    pub fn remove_props<'a, S: AsRef<str>>(
        &self,
        collection: &'a mut Vec<Record>,
        props: &[S],
        target: Predicate,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.inner.remove_props(collection, props, target)
    }

    /// Shallow-merges `updates` onto the located record.
    pub fn update_properties<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        updates: &Record,
        target: Predicate,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.inner.update_properties(collection, updates, target)
    }

    /// Inserts a record at the front, then sorts when a sort is given.
    pub fn add<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
        sort: Option<SortSpec>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        self.inner.add(collection, record, sort)
    }
}

struct WriteOperationsInner {
    config: ObjListConfig,
    read_operations: ReadOperations,
    sort_operations: SortOperations,
}

impl WriteOperationsInner {
    fn new(
        config: ObjListConfig,
        read_operations: ReadOperations,
        sort_operations: SortOperations,
    ) -> Self {
        Self {
            config,
            read_operations,
            sort_operations,
        }
    }

    fn replace<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
        target: Option<Predicate>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        let target = self.target_of(&record, target)?;
        let position = self.position_of(collection, &target, "replace")?;

        collection[position] = record;
        log::debug!("Replaced record at {} matching {}", position, target);
        Ok(collection)
    }

    fn update<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
        target: Option<Predicate>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        let target = self.target_of(&record, target)?;
        let position = self.position_of(collection, &target, "update")?;

        collection[position].merge(&record);
        log::debug!("Updated record at {} matching {}", position, target);
        Ok(collection)
    }

    fn remove<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        target: Predicate,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        let position = self.position_of(collection, &target, "remove")?;

        collection.remove(position);
        log::debug!("Removed record at {} matching {}", position, target);
        Ok(collection)
    }

    fn remove_props<'a, S: AsRef<str>>(
        &self,
        collection: &'a mut Vec<Record>,
        props: &[S],
        target: Predicate,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        let position = self.position_of(collection, &target, "remove fields from")?;
        let separator = self.config.field_separator();
        let stripped = collection[position].without_fields(props, &separator)?;

        collection[position] = stripped;
        log::debug!(
            "Removed {} field(s) from record at {} matching {}",
            props.len(),
            position,
            target
        );
        Ok(collection)
    }

    fn update_properties<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        updates: &Record,
        target: Predicate,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        let position = self.position_of(collection, &target, "update fields of")?;

        collection[position].merge(updates);
        log::debug!(
            "Updated {} field(s) of record at {} matching {}",
            updates.size(),
            position,
            target
        );
        Ok(collection)
    }

    fn add<'a>(
        &self,
        collection: &'a mut Vec<Record>,
        record: Record,
        sort: Option<SortSpec>,
    ) -> ObjListResult<&'a mut Vec<Record>> {
        collection.insert(0, record);

        match sort {
            Some(spec) => {
                // a failed sort moves nothing, so the new record is still first
                if let Err(err) = self.sort_operations.sort(collection, &spec) {
                    collection.remove(0);
                    return Err(err);
                }
                log::debug!("Added record, collection sorted by {}", spec);
            }
            None => log::debug!("Added record at the front without sorting"),
        }
        Ok(collection)
    }

    fn target_of(&self, record: &Record, target: Option<Predicate>) -> ObjListResult<Predicate> {
        Predicate::for_record(
            record,
            target,
            &self.config.identity_field(),
            &self.config.field_separator(),
        )
    }

    /// Locates the target of a positional mutation; a missing target is an
    /// out of range error.
    fn position_of(
        &self,
        collection: &[Record],
        target: &Predicate,
        action: &str,
    ) -> ObjListResult<usize> {
        match self.read_operations.locate(collection, target)? {
            Some(position) => Ok(position),
            None => {
                log::error!("Cannot {} record, no record matches {}", action, target);
                Err(ObjListError::new(
                    &format!("Cannot {} record, no record matches {}", action, target),
                    ErrorKind::OutOfRange,
                ))
            }
        }
    }
}
