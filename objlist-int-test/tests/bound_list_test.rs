use objlist::collection::{BoundList, Record, SortSpec};
use objlist::common::Value;
use objlist::errors::ObjListResult;
use objlist::filter::Predicate;
use objlist::obj_list::ObjList;
use objlist::record;
use objlist_int_test::test_util::{create_test_context, ids, run_test};

#[ctor::ctor]
fn init() {
    colog::init();
}

/// Applies the same mutation directly and through a binding, and checks
/// both collections end up equal.
fn assert_same_outcome<D, B>(engine: &ObjList, users: &[Record], direct: D, bound: B)
where
    D: FnOnce(&ObjList, &mut Vec<Record>) -> ObjListResult<()>,
    B: FnOnce(&mut BoundList) -> ObjListResult<()>,
{
    let mut left = users.to_vec();
    let mut right = users.to_vec();

    let direct_result = direct(engine, &mut left);
    let bound_result = {
        let mut binding = engine.bind(&mut right);
        bound(&mut binding)
    };

    assert_eq!(direct_result.is_ok(), bound_result.is_ok());
    if let (Err(a), Err(b)) = (&direct_result, &bound_result) {
        assert_eq!(a.kind(), b.kind());
    }
    assert_eq!(left, right);
}

#[test]
fn test_bound_accessors_match_direct_calls() {
    run_test(
        || create_test_context(),
        |ctx| {
            let engine = ctx.engine();
            let mut users = ctx.users();
            let expected_get = engine.get(&users, 3)?.cloned();
            let expected_all = engine.get_all(&users, record! { common: "abc" })?;
            let expected_contains = engine.contains(&users, ("username", "Kamren"))?;
            let expected_order = engine.order(&users, "id", vec![5, 1])?;

            let bound = engine.bind(&mut users);
            assert_eq!(bound.get(3)?.cloned(), expected_get);
            assert_eq!(bound.get_all(record! { common: "abc" })?, expected_all);
            assert_eq!(bound.contains(("username", "Kamren"))?, expected_contains);
            assert_eq!(bound.order("id", vec![5, 1])?, expected_order);
            assert_eq!(bound.locate(&Predicate::from(10))?, Some(9));
            Ok(())
        },
    )
}

#[test]
fn test_bound_mutators_match_direct_calls() {
    run_test(
        || create_test_context(),
        |ctx| {
            let engine = ctx.engine();
            let users = ctx.users();

            assert_same_outcome(
                &engine,
                &users,
                |e, c| e.replace(c, record! { id: 2, username: "x" }).map(|_| ()),
                |b| b.replace(record! { id: 2, username: "x" }).map(|_| ()),
            );
            assert_same_outcome(
                &engine,
                &users,
                |e, c| {
                    e.replace_where(c, record! { id: 20 }, ("username", "Antonette"))
                        .map(|_| ())
                },
                |b| b.replace_where(record! { id: 20 }, ("username", "Antonette")).map(|_| ()),
            );
            assert_same_outcome(
                &engine,
                &users,
                |e, c| e.update(c, record! { id: 4, phone: "1" }).map(|_| ()),
                |b| b.update(record! { id: 4, phone: "1" }).map(|_| ()),
            );
            assert_same_outcome(
                &engine,
                &users,
                |e, c| e.update_where(c, record! { phone: "1" }, 4).map(|_| ()),
                |b| b.update_where(record! { phone: "1" }, 4).map(|_| ()),
            );
            assert_same_outcome(
                &engine,
                &users,
                |e, c| e.remove(c, 7).map(|_| ()),
                |b| b.remove(7).map(|_| ()),
            );
            assert_same_outcome(
                &engine,
                &users,
                |e, c| e.remove_props(c, &["email"], 8).map(|_| ()),
                |b| b.remove_props(&["email"], 8).map(|_| ()),
            );
            assert_same_outcome(
                &engine,
                &users,
                |e, c| e.update_properties(c, &record! { a: 1 }, 9).map(|_| ()),
                |b| b.update_properties(&record! { a: 1 }, 9).map(|_| ()),
            );
            assert_same_outcome(
                &engine,
                &users,
                |e, c| e.add(c, record! { id: 11 }, Some(SortSpec::descending("id"))).map(|_| ()),
                |b| b.add(record! { id: 11 }, Some(SortSpec::descending("id"))).map(|_| ()),
            );
            assert_same_outcome(
                &engine,
                &users,
                |e, c| e.sort(c, "email").map(|_| ()),
                |b| b.sort("email").map(|_| ()),
            );
            // failures match too
            assert_same_outcome(
                &engine,
                &users,
                |e, c| e.remove(c, 77).map(|_| ()),
                |b| b.remove(77).map(|_| ()),
            );
            Ok(())
        },
    )
}

#[test]
fn test_bound_handle_is_the_collection() {
    run_test(
        || create_test_context(),
        |ctx| {
            let engine = ctx.engine();
            let mut users = ctx.users();
            let address = &users as *const Vec<Record>;

            let mut bound = engine.bind(&mut users);
            let handle = bound.update_properties(&record! { active: true }, 1)?;
            assert!(std::ptr::eq(handle as *const Vec<Record>, address));
            let handle = bound.sort(SortSpec::descending("id"))?;
            assert!(std::ptr::eq(handle as *const Vec<Record>, address));

            let collection = bound.into_inner();
            assert!(std::ptr::eq(collection as *const Vec<Record>, address));
            assert_eq!(ids(collection)?[0], 10);
            Ok(())
        },
    )
}

#[test]
fn test_bound_session() {
    run_test(
        || create_test_context(),
        |ctx| {
            let engine = ctx.engine();
            let mut users = ctx.users();

            {
                let mut bound = engine.bind(&mut users);
                bound.remove(record! { common: "abc", common2: "def" })?;
                bound.add(record! { id: 0, username: "root" }, Some("username".into()))?;
                assert_eq!(bound.len(), 10);
                assert!(!bound.is_empty());
                assert_eq!(bound.collection()[0].get("id")?, Value::I64(2));
            }

            assert!(!engine.contains(&users, 1)?);
            assert!(engine.contains(&users, ("username", "root"))?);
            Ok(())
        },
    )
}
