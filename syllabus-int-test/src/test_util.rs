use std::backtrace::Backtrace;
use std::thread;
use std::time::{Duration, Instant};
use syllabus::collection::{CollectionId, Document};
use syllabus::common::{Direction, FieldName, FieldPath, UpgradableLock, Value};
use syllabus::converter::DocumentConverter;
use syllabus::encoding::IndexEntryEncoder;
use syllabus::errors::SyllabusResult;
use syllabus::index::{Index, IndexField, IndexName, Indexer};
use syllabus::store::{
    Cursor, InMemoryKeyValueStore, KeyValueStore, KeyValueStoreProvider, WriteOperation,
};

/// Runs a test between a setup and a teardown step, retrying a failing run.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> SyllabusResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> SyllabusResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> SyllabusResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    const MAX_RETRIES: u32 = 3;
    let mut last_error: Option<String> = None;

    for attempt in 1..=MAX_RETRIES {
        let start_time = Instant::now();

        let result = std::panic::catch_unwind(|| {
            let backtrace = Backtrace::capture();
            match before() {
                Ok(ctx) => match test(ctx.clone()) {
                    Ok(_) => after(ctx).map_err(|e| {
                        (format!("After run failed: {:?}", e), backtrace.to_string())
                    }),
                    Err(e) => {
                        let _ = after(ctx);
                        Err((format!("Test failed: {:?}", e), backtrace.to_string()))
                    }
                },
                Err(e) => Err((format!("Before run failed: {:?}", e), backtrace.to_string())),
            }
        });

        let elapsed = start_time.elapsed();
        match result {
            Ok(Ok(_)) => return,
            Ok(Err((e, _))) => last_error = Some(e),
            Err(panic_err) => {
                let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_err.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                last_error = Some(format!("Panic: {}", err_msg));
            }
        }

        if attempt < MAX_RETRIES {
            eprintln!(
                "Test attempt {}/{} failed (took {:?}): {}",
                attempt,
                MAX_RETRIES,
                elapsed,
                last_error.as_deref().unwrap_or("Unknown")
            );
            thread::sleep(Duration::from_millis(100 * attempt as u64));
        }
    }

    panic!(
        "Test failed after {} attempts. Last error: {}",
        MAX_RETRIES,
        last_error.unwrap_or_default()
    );
}

/// A store, an indexer over it and a lock guarding index maintenance.
#[derive(Clone)]
pub struct TestContext {
    store: KeyValueStore,
    indexer: Indexer,
    lock: UpgradableLock,
}

impl TestContext {
    pub fn new(indexes: Vec<Index>) -> Self {
        TestContext {
            store: KeyValueStore::new(InMemoryKeyValueStore::new()),
            indexer: Indexer::new(indexes),
            lock: UpgradableLock::with_timeout(Duration::from_secs(5)),
        }
    }

    pub fn store(&self) -> KeyValueStore {
        self.store.clone()
    }

    pub fn indexer(&self) -> &Indexer {
        &self.indexer
    }

    pub fn lock(&self) -> UpgradableLock {
        self.lock.clone()
    }

    /// Writes one key per index entry of `document`, valued with its path.
    pub fn insert(&self, document: &Document) -> SyllabusResult<()> {
        let mut lease = self.lock.write_lock()?;
        let batch = self
            .indexer
            .index(document)
            .iter()
            .map(|entry| {
                WriteOperation::put(IndexEntryEncoder::encode(entry), document.path().to_string())
            })
            .collect();
        self.store.write(batch)?;
        lease.release()
    }

    /// Removes every index key of `document`.
    pub fn remove(&self, document: &Document) -> SyllabusResult<()> {
        let mut lease = self.lock.write_lock()?;
        let batch = self
            .indexer
            .index(document)
            .iter()
            .map(|entry| WriteOperation::delete(IndexEntryEncoder::encode(entry)))
            .collect();
        self.store.write(batch)?;
        lease.release()
    }

    /// Document paths stored under `index`, in key order.
    pub fn scan_index(&self, index: &IndexName) -> SyllabusResult<Vec<String>> {
        let mut lease = self.lock.read_lock()?;
        let prefix = IndexEntryEncoder::prefix(index);
        let mut cursor = self.store.cursor();
        cursor.seek(&prefix);
        let paths = cursor
            .entries()
            .take_while(|(key, _)| key.starts_with(&prefix))
            .map(|(_, value)| value.to_utf8())
            .collect::<SyllabusResult<Vec<_>>>()?;
        lease.release()?;
        Ok(paths)
    }
}

pub fn create_test_context(indexes: Vec<Index>) -> SyllabusResult<TestContext> {
    Ok(TestContext::new(indexes))
}

pub fn cleanup(_ctx: TestContext) -> SyllabusResult<()> {
    Ok(())
}

/// Builds an index from `(dotted path, direction)` pairs.
pub fn index(name: &str, collection: &str, fields: &[(&str, Direction)]) -> SyllabusResult<Index> {
    let fields = fields
        .iter()
        .map(|(path, direction)| Ok(IndexField::new(FieldPath::parse(path)?, *direction)))
        .collect::<SyllabusResult<Vec<_>>>()?;
    Index::new(IndexName::new(name)?, CollectionId::new(collection)?, fields)
}

pub fn document(json: &str) -> SyllabusResult<Document> {
    DocumentConverter::from_json_str(json)
}

pub fn field(name: &str) -> FieldName {
    FieldName::new(name).unwrap()
}

/// Every entry from the start of the cursor, decoded as UTF-8.
pub fn scan(cursor: &mut Cursor) -> Vec<(String, String)> {
    cursor.seek_to_start();
    cursor
        .entries()
        .map(|(k, v)| (k.to_utf8().unwrap(), v.to_utf8().unwrap()))
        .collect()
}

pub fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Values of every variant in ascending order. `-0.0` and `+0.0` are both
/// present and compare equal.
pub fn total_order_fixture() -> Vec<Value> {
    let object = |entries: Vec<(&str, Value)>| {
        Value::object(entries.into_iter().map(|(name, value)| (field(name), value)))
    };

    vec![
        Value::NULL,
        Value::FALSE,
        Value::TRUE,
        Value::NAN,
        Value::from(f64::NEG_INFINITY),
        Value::from(-f64::MAX),
        Value::from(-std::f64::consts::PI),
        Value::from(-f64::MIN_POSITIVE),
        Value::from(-f64::from_bits(1)),
        Value::from(-0.0),
        Value::from(0.0),
        Value::from(f64::from_bits(1)),
        Value::from(f64::MIN_POSITIVE),
        Value::from(std::f64::consts::PI),
        Value::from(f64::MAX),
        Value::from(f64::INFINITY),
        Value::from(""),
        Value::from("\0"),
        Value::from("\0\0"),
        Value::from("a"),
        Value::from("\u{20ac}"),
        Value::from("\u{FF61}"),
        Value::from("\u{10002}"),
        Value::from("\u{23456}"),
        Value::empty_list(),
        Value::list(vec![Value::NULL]),
        Value::list(vec![Value::FALSE]),
        Value::list(vec![Value::FALSE, Value::NULL]),
        Value::list(vec![Value::FALSE, Value::TRUE]),
        Value::list(vec![Value::TRUE]),
        Value::list(vec![Value::TRUE, Value::NULL]),
        Value::empty_object(),
        object(vec![("a", Value::NULL)]),
        object(vec![("a", Value::FALSE)]),
        object(vec![("aa", Value::NULL)]),
        object(vec![(
            "nest",
            Value::list(vec![Value::TRUE, Value::FALSE]),
        )]),
    ]
}

/// Polls `check` until it holds, panicking after `timeout`.
pub fn wait_for<F: Fn() -> bool>(timeout: Duration, check: F) {
    awaitility::at_most(timeout).until(check);
}
