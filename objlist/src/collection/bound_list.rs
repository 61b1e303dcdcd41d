use crate::collection::{Record, SortSpec};
use crate::errors::ObjListResult;
use crate::filter::Predicate;
use crate::obj_list::ObjList;

/// A collection bound to an [ObjList] engine.
///
/// Every operation of the engine is available without the collection
/// argument, and produces exactly the same outcome as the direct call.
/// The binding borrows the collection mutably for its whole lifetime;
/// drop it, or call [BoundList::into_inner], to get the collection back.
///
/// ```rust
/// use objlist::obj_list::ObjList;
/// use objlist::record;
///
/// let engine = ObjList::new();
/// let mut users = vec![record! { id: 2 }, record! { id: 1 }];
///
/// let mut bound = engine.bind(&mut users);
/// bound.add(record! { id: 3 }, Some("id".into())).unwrap();
/// assert_eq!(bound.len(), 3);
/// assert_eq!(bound.get(1).unwrap(), bound.collection().first());
/// ```
pub struct BoundList<'a> {
    engine: ObjList,
    collection: &'a mut Vec<Record>,
}

impl<'a> BoundList<'a> {
    pub(crate) fn new(engine: ObjList, collection: &'a mut Vec<Record>) -> Self {
        BoundList { engine, collection }
    }

    /// Returns the engine this collection is bound to.
    pub fn engine(&self) -> &ObjList {
        &self.engine
    }

    /// Returns the bound collection.
    pub fn collection(&self) -> &[Record] {
        self.collection.as_slice()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Releases the binding and returns the collection handle.
    pub fn into_inner(self) -> &'a mut Vec<Record> {
        self.collection
    }

    pub fn get(&self, predicate: impl Into<Predicate>) -> ObjListResult<Option<&Record>> {
        self.engine.get(self.collection.as_slice(), predicate)
    }

    pub fn get_all(&self, predicate: impl Into<Predicate>) -> ObjListResult<Vec<Record>> {
        self.engine.get_all(self.collection.as_slice(), predicate)
    }

    pub fn contains(&self, predicate: impl Into<Predicate>) -> ObjListResult<bool> {
        self.engine.contains(self.collection.as_slice(), predicate)
    }

    pub fn locate(&self, predicate: &Predicate) -> ObjListResult<Option<usize>> {
        self.engine.locate(self.collection.as_slice(), predicate)
    }

    pub fn replace(&mut self, record: Record) -> ObjListResult<&mut Vec<Record>> {
        self.engine.replace(self.collection, record)
    }

    pub fn replace_where(
        &mut self,
        record: Record,
        target: impl Into<Predicate>,
    ) -> ObjListResult<&mut Vec<Record>> {
        self.engine.replace_where(self.collection, record, target)
    }

    pub fn update(&mut self, record: Record) -> ObjListResult<&mut Vec<Record>> {
        self.engine.update(self.collection, record)
    }

    pub fn update_where(
        &mut self,
        record: Record,
        target: impl Into<Predicate>,
    ) -> ObjListResult<&mut Vec<Record>> {
        self.engine.update_where(self.collection, record, target)
    }

    pub fn remove(&mut self, target: impl Into<Predicate>) -> ObjListResult<&mut Vec<Record>> {
        self.engine.remove(self.collection, target)
    }

    pub fn remove_props<S: AsRef<str>>(
        &mut self,
        props: &[S],
        target: impl Into<Predicate>,
    ) -> ObjListResult<&mut Vec<Record>> {
        self.engine.remove_props(self.collection, props, target)
    }

    pub fn update_properties(
        &mut self,
        updates: &Record,
        target: impl Into<Predicate>,
    ) -> ObjListResult<&mut Vec<Record>> {
        self.engine.update_properties(self.collection, updates, target)
    }

    pub fn add(
        &mut self,
        record: Record,
        sort: Option<SortSpec>,
    ) -> ObjListResult<&mut Vec<Record>> {
        self.engine.add(self.collection, record, sort)
    }

    pub fn sort(&mut self, spec: impl Into<SortSpec>) -> ObjListResult<&mut Vec<Record>> {
        self.engine.sort(self.collection, spec)
    }

    pub fn order<I, P>(&self, key: &str, new_order: I) -> ObjListResult<Vec<Option<Record>>>
    where
        I: IntoIterator<Item = P>,
        P: Into<Predicate>,
    {
        self.engine.order(self.collection.as_slice(), key, new_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Value;
    use crate::errors::ErrorKind;
    use crate::record;

    fn set_up() -> Vec<Record> {
        vec![
            record! { id: 1, username: "Bret", common: "abc" },
            record! { id: 2, username: "Antonette" },
            record! { id: 3, username: "Samantha", common: "abc" },
        ]
    }

    #[test]
    fn test_bound_reads_match_direct_reads() {
        let engine = ObjList::new();
        let mut direct = set_up();
        let expected_get = engine.get(&direct, 3).unwrap().cloned();
        let expected_all = engine.get_all(&direct, ("common", "abc")).unwrap();

        let bound = engine.bind(&mut direct);
        assert_eq!(bound.get(3).unwrap().cloned(), expected_get);
        assert_eq!(bound.get_all(("common", "abc")).unwrap(), expected_all);
        assert!(bound.contains(2).unwrap());
        assert_eq!(bound.locate(&Predicate::from(2)).unwrap(), Some(1));
    }

    #[test]
    fn test_bound_mutation_returns_bound_collection() {
        let engine = ObjList::new();
        let mut data = set_up();
        let address = &data as *const Vec<Record>;

        let mut bound = engine.bind(&mut data);
        let handle = bound.remove(2).unwrap();
        assert!(std::ptr::eq(handle as *const _, address));
        assert_eq!(bound.len(), 2);

        let collection = bound.into_inner();
        assert!(std::ptr::eq(collection as *const _, address));
    }

    #[test]
    fn test_bound_mutators() {
        let engine = ObjList::new();
        let mut data = set_up();
        let mut bound = engine.bind(&mut data);

        bound.replace(record! { id: 1, username: "B" }).unwrap();
        bound.update(record! { id: 2, phone: "1" }).unwrap();
        bound.remove_props(&["common"], 3).unwrap();
        bound
            .update_properties(&record! { username: "S" }, ("username", "Samantha"))
            .unwrap();
        bound.add(record! { id: 0 }, None).unwrap();
        bound.sort(SortSpec::descending("id")).unwrap();

        let ordered = bound.order("id", vec![0, 1]).unwrap();
        assert_eq!(ordered[0].as_ref().unwrap().get("id").unwrap(), Value::I64(0));
        drop(bound);

        assert_eq!(data.len(), 4);
        assert_eq!(data[0], record! { id: 3, username: "S" });
        assert_eq!(data[1], record! { id: 2, username: "Antonette", phone: "1" });
        assert_eq!(data[2], record! { id: 1, username: "B" });
    }

    #[test]
    fn test_bound_errors_leave_collection() {
        let engine = ObjList::new();
        let mut data = set_up();
        let before = data.clone();

        let mut bound = engine.bind(&mut data);
        let err = bound.remove(9).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::OutOfRange);
        let err = bound.replace_where(record! { id: 9 }, 9).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::OutOfRange);
        let err = bound.update_where(record! {}, record! {}).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MalformedSpecification);
        assert!(bound.engine().config().is_initialized());
        drop(bound);

        assert_eq!(data, before);
    }
}
