use objlist::common::Value;
use objlist::errors::ErrorKind;
use objlist::filter::Predicate;
use objlist::record;
use objlist_int_test::test_util::{create_test_context, ids, run_test};

#[ctor::ctor]
fn init() {
    colog::init();
}

#[test]
fn test_get_by_identity() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            let user = ctx.engine().get(&users, 3)?;
            assert!(user.is_some());
            let user = user.unwrap();
            assert_eq!(user.get("username")?, Value::from("Samantha"));
            assert_eq!(user.get("email")?, Value::from("Nathan@yesenia.net"));
            assert!(std::ptr::eq(user, &users[2]));
            Ok(())
        },
    )
}

#[test]
fn test_get_by_field() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            let user = ctx.engine().get(&users, ("username", "Karianne"))?;
            assert_eq!(user.unwrap().get("id")?, Value::I64(4));
            Ok(())
        },
    )
}

#[test]
fn test_get_by_fields() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            let spec = record! { username: "Samantha", email: "Nathan@yesenia.net" };
            let user = ctx.engine().get(&users, spec)?;
            assert_eq!(user.unwrap().get("id")?, Value::I64(3));

            let spec = record! { username: "Samantha", email: "Sincere@april.biz" };
            assert!(ctx.engine().get(&users, spec)?.is_none());
            Ok(())
        },
    )
}

#[test]
fn test_get_by_embedded_field() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            let user = ctx.engine().get(&users, ("address.city", "Roscoeview"))?;
            assert_eq!(user.unwrap().get("username")?, Value::from("Kamren"));
            Ok(())
        },
    )
}

#[test]
fn test_get_missing_is_none() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            assert!(ctx.engine().get(&users, 42)?.is_none());
            assert!(ctx.engine().get(&users, "3")?.is_none());
            assert!(ctx.engine().get(&[], 1)?.is_none());
            Ok(())
        },
    )
}

#[test]
fn test_get_all() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            let engine = ctx.engine();

            let found = engine.get_all(&users, record! { common: "abc" })?;
            assert_eq!(ids(&found)?, vec![1, 3, 6]);

            let found = engine.get_all(&users, record! { common: "abc", common2: "def" })?;
            assert_eq!(ids(&found)?, vec![1, 3]);

            let found = engine.get_all(&users, ("common2", "def"))?;
            assert_eq!(ids(&found)?, vec![1, 3, 4]);

            let found = engine.get_all(&users, ("common", "none"))?;
            assert!(found.is_empty());
            Ok(())
        },
    )
}

#[test]
fn test_get_all_returns_copies() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            let mut found = ctx.engine().get_all(&users, ("common", "abc"))?;
            found[0].put("username", "changed")?;
            assert_eq!(users[0].get("username")?, Value::from("Bret"));
            Ok(())
        },
    )
}

#[test]
fn test_get_all_matches_missing_fields_with_null() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            let found = ctx.engine().get_all(&users, ("common", Value::Null))?;
            assert_eq!(ids(&found)?, vec![5, 7, 8, 9, 10]);
            Ok(())
        },
    )
}

#[test]
fn test_contains() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            let engine = ctx.engine();
            assert!(engine.contains(&users, 10)?);
            assert!(engine.contains(&users, ("username", "Delphine"))?);
            assert!(engine.contains(&users, record! { common: "abc", id: 6 })?);
            assert!(!engine.contains(&users, 11)?);
            assert!(!engine.contains(&users, record! { common: "abc", id: 2 })?);
            Ok(())
        },
    )
}

#[test]
fn test_locate() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            let engine = ctx.engine();
            assert_eq!(engine.locate(&users, &Predicate::from(7))?, Some(6));
            assert_eq!(engine.locate(&users, &Predicate::from(70))?, None);
            Ok(())
        },
    )
}

#[test]
fn test_malformed_predicates() {
    run_test(
        || create_test_context(),
        |ctx| {
            let users = ctx.users();
            let engine = ctx.engine();

            let err = engine.get(&users, record! {}).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::MalformedSpecification);

            let err = engine.contains(&users, ("", 1)).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidFieldName);

            let err = Predicate::from_key_value(1, Some(Value::I64(1))).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::MalformedSpecification);
            Ok(())
        },
    )
}

#[test]
fn test_get_past_short_arrays() {
    run_test(
        || create_test_context(),
        |ctx| {
            let engine = ctx.engine();
            let tagged = vec![
                record! { id: 1, tags: ["a"] },
                record! { id: 2, tags: ["a", "b"] },
            ];

            let found = engine.get(&tagged, ("tags.1", "b"))?;
            assert_eq!(found.unwrap().get("id")?, Value::I64(2));
            assert!(!engine.contains(&tagged, ("tags.1", "zzz"))?);
            assert_eq!(ids(&engine.get_all(&tagged, ("tags.0", "a"))?)?, vec![1, 2]);

            let err = engine.get(&tagged, ("tags.-1", "a")).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ValidationError);
            Ok(())
        },
    )
}
