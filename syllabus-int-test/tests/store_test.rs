use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use syllabus::errors::ErrorKind;
use syllabus::store::{InMemoryKeyValueStore, KeyValueStore, KeyValueStoreProvider, WriteOperation};
use syllabus_int_test::test_util::{pairs, scan, wait_for};

#[ctor::ctor]
fn init() {
    colog::init();
}

fn new_store() -> KeyValueStore {
    KeyValueStore::new(InMemoryKeyValueStore::new())
}

#[test]
fn test_cursor_sees_snapshot_only() {
    let store = new_store();
    store
        .write(vec![WriteOperation::put("baz", "fizz"), WriteOperation::put("qux", "thud")])
        .unwrap();
    let mut before = store.cursor();

    store.write(vec![WriteOperation::put("foo", "bar")]).unwrap();

    assert_eq!(scan(&mut before), pairs(&[("baz", "fizz"), ("qux", "thud")]));
    assert_eq!(
        scan(&mut store.cursor()),
        pairs(&[("baz", "fizz"), ("foo", "bar"), ("qux", "thud")])
    );
}

#[test]
fn test_delete_hidden_from_new_cursors_only() {
    let store = new_store();
    store
        .write(vec![WriteOperation::put("a", "1"), WriteOperation::put("b", "2")])
        .unwrap();
    let mut before = store.cursor();

    store.write(vec![WriteOperation::delete("a")]).unwrap();

    assert_eq!(scan(&mut before), pairs(&[("a", "1"), ("b", "2")]));
    assert_eq!(scan(&mut store.cursor()), pairs(&[("b", "2")]));
}

#[test]
fn test_seek_and_walk_both_ways() {
    let store = new_store();
    store
        .write(vec![
            WriteOperation::put("apple", "1"),
            WriteOperation::put("banana", "2"),
            WriteOperation::put("cherry", "3"),
        ])
        .unwrap();

    let mut cursor = store.cursor();
    cursor.seek(b"b");
    assert_eq!(cursor.key().unwrap().to_utf8().unwrap(), "banana");
    cursor.previous().unwrap();
    assert_eq!(cursor.key().unwrap().to_utf8().unwrap(), "apple");
    cursor.previous().unwrap();
    assert!(!cursor.valid());
    assert_eq!(cursor.key().unwrap_err().kind(), &ErrorKind::IllegalState);
    assert_eq!(cursor.next().unwrap_err().kind(), &ErrorKind::IllegalState);

    cursor.seek_to_end();
    assert_eq!(cursor.value().unwrap().to_utf8().unwrap(), "3");
    cursor.next().unwrap();
    assert!(!cursor.valid());
}

#[test]
fn test_reader_never_sees_partial_batch() {
    let store = new_store();
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let store = store.clone();
        let done = done.clone();
        thread::spawn(move || {
            for round in 0..200 {
                let value = format!("{:03}", round);
                store
                    .write(vec![
                        WriteOperation::put("left", value.as_str()),
                        WriteOperation::put("right", value.as_str()),
                    ])
                    .unwrap();
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    while !done.load(Ordering::SeqCst) {
        let entries = scan(&mut store.cursor());
        if entries.len() == 2 {
            assert_eq!(entries[0].1, entries[1].1);
        } else {
            assert!(entries.is_empty());
        }
    }
    writer.join().unwrap();
    assert_eq!(scan(&mut store.cursor()), pairs(&[("left", "199"), ("right", "199")]));
}

#[test]
fn test_cursor_moves_to_another_thread() {
    let store = new_store();
    store.write(vec![WriteOperation::put("k", "v")]).unwrap();
    let mut cursor = store.cursor();
    let seen = Arc::new(AtomicBool::new(false));
    let seen_clone = seen.clone();
    thread::spawn(move || {
        cursor.seek_to_start();
        if cursor.valid() {
            seen_clone.store(true, Ordering::SeqCst);
        }
    });
    wait_for(Duration::from_secs(5), || seen.load(Ordering::SeqCst));
}
