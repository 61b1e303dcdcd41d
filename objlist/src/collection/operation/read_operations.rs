use crate::{
    collection::Record,
    errors::ObjListResult,
    filter::{locate, locate_all, Predicate},
    obj_list_config::ObjListConfig,
};
use std::ops::Deref;
use std::sync::Arc;

/// Read-only queries over a collection.
#[derive(Clone)]
pub(crate) struct ReadOperations {
    inner: Arc<ReadOperationsInner>,
}

impl ReadOperations {
    pub fn new(config: ObjListConfig) -> Self {
        Self {
            inner: Arc::new(ReadOperationsInner::new(config)),
        }
    }
}

impl Deref for ReadOperations {
    type Target = Arc<ReadOperationsInner>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub(crate) struct ReadOperationsInner {
    config: ObjListConfig,
}

impl ReadOperationsInner {
    fn new(config: ObjListConfig) -> Self {
        Self { config }
    }

    pub fn get<'a>(
        &self,
        collection: &'a [Record],
        predicate: &Predicate,
    ) -> ObjListResult<Option<&'a Record>> {
        let position = self.locate(collection, predicate)?;
        Ok(position.map(|index| &collection[index]))
    }

    pub fn get_all(
        &self,
        collection: &[Record],
        predicate: &Predicate,
    ) -> ObjListResult<Vec<Record>> {
        let conditions = predicate.conditions(&self.config.identity_field())?;
        let positions = locate_all(collection, &conditions, &self.config.field_separator())?;
        log::debug!("{} matched {} record(s)", predicate, positions.len());

        Ok(positions
            .into_iter()
            .map(|index| collection[index].clone())
            .collect())
    }

    pub fn contains(&self, collection: &[Record], predicate: &Predicate) -> ObjListResult<bool> {
        Ok(self.locate(collection, predicate)?.is_some())
    }

    /// Position of the first record matching every condition of the
    /// predicate.
    pub fn locate(
        &self,
        collection: &[Record],
        predicate: &Predicate,
    ) -> ObjListResult<Option<usize>> {
        let conditions = predicate.conditions(&self.config.identity_field())?;
        let position = locate(collection, &conditions, &self.config.field_separator())?;
        log::debug!("{} located at {:?}", predicate, position);
        Ok(position)
    }
}
