use std::thread;
use syllabus::common::Direction;
use syllabus::converter::{DocumentConverter, IndexConverter};
use syllabus::index::IndexName;
use syllabus::store::KeyValueStoreProvider;
use syllabus_int_test::test_util::{cleanup, create_test_context, document, index, run_test};

#[ctor::ctor]
fn init() {
    colog::init();
}

#[test]
fn test_index_scan_follows_value_order() {
    run_test(
        || {
            create_test_context(vec![
                index("by_age", "users", &[("age", Direction::Descending)])?,
                index("by_name", "users", &[("name", Direction::Ascending)])?,
            ])
        },
        |ctx| {
            ctx.insert(&document(r#"{"_id": "users/ann", "name": "Ann", "age": 31}"#)?)?;
            ctx.insert(&document(r#"{"_id": "users/bob", "name": "Bob", "age": 45}"#)?)?;
            ctx.insert(&document(r#"{"_id": "users/cy", "name": "Cy"}"#)?)?;

            let by_age = ctx.scan_index(&IndexName::new("by_age")?)?;
            assert_eq!(by_age, vec!["users/bob", "users/ann"]);

            let by_name = ctx.scan_index(&IndexName::new("by_name")?)?;
            assert_eq!(by_name, vec!["users/ann", "users/bob", "users/cy"]);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_remove_drops_index_keys() {
    run_test(
        || create_test_context(vec![index("by_tag", "posts", &[("tag", Direction::Ascending)])?]),
        |ctx| {
            let first = document(r#"{"_id": "posts/p1", "tag": "a"}"#)?;
            let second = document(r#"{"_id": "posts/p2", "tag": "b"}"#)?;
            ctx.insert(&first)?;
            ctx.insert(&second)?;

            let snapshot = ctx.store().cursor();
            ctx.remove(&first)?;

            assert_eq!(ctx.scan_index(&IndexName::new("by_tag")?)?, vec!["posts/p2"]);
            let mut snapshot = snapshot;
            snapshot.seek_to_start();
            assert_eq!(snapshot.entries().count(), 2);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_index_definition_from_json() {
    run_test(
        || {
            let definition = IndexConverter::from_json_str(
                r#"{"collection": "users", "fields": [{"field": "address.city", "type": "asc"}], "name": "by_city"}"#,
            )?;
            create_test_context(vec![definition])
        },
        |ctx| {
            ctx.insert(&document(r#"{"_id": "users/u1", "address": {"city": "Rome"}}"#)?)?;
            ctx.insert(&document(r#"{"_id": "users/u2", "address": {"city": "Lima"}}"#)?)?;
            ctx.insert(&document(r#"{"_id": "users/u3", "address": "unknown"}"#)?)?;

            let by_city = ctx.scan_index(&IndexName::new("by_city")?)?;
            assert_eq!(by_city, vec!["users/u2", "users/u1"]);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_concurrent_inserts_are_all_indexed() {
    run_test(
        || create_test_context(vec![index("by_n", "items", &[("n", Direction::Ascending)])?]),
        |ctx| {
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let ctx = ctx.clone();
                    thread::spawn(move || {
                        for i in 0..25 {
                            let n = t * 25 + i;
                            let json = format!(r#"{{"_id": "items/i{}", "n": {}}}"#, n, n);
                            ctx.insert(&document(&json)?)?;
                        }
                        Ok::<(), syllabus::errors::SyllabusError>(())
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap()?;
            }

            let by_n = ctx.scan_index(&IndexName::new("by_n")?)?;
            let expected: Vec<String> = (0..100).map(|n| format!("items/i{}", n)).collect();
            assert_eq!(by_n, expected);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_document_json_round_trip() {
    let json = r#"{"_id":"users/ann","age":31.5,"tags":["x",null]}"#;
    let doc = DocumentConverter::from_json_str(json).unwrap();
    assert_eq!(DocumentConverter::to_json_string(&doc).unwrap(), json);
}
