use crate::collection::{CollectionId, Document};
use crate::index::{Index, IndexEntry, IndexValue};
use std::collections::HashMap;

/// Derives secondary-index entries from documents.
///
/// The indexer holds the index definitions grouped by collection. Indexing a
/// document visits the definitions of its collection in the order they were
/// given and produces one [IndexEntry] per definition whose fields all
/// resolve. A definition with any unresolved field is skipped, which makes
/// every index sparse.
#[derive(Clone, Debug, Default)]
pub struct Indexer {
    by_collection: HashMap<CollectionId, Vec<Index>>,
}

impl Indexer {
    pub fn new(indexes: Vec<Index>) -> Indexer {
        let mut by_collection: HashMap<CollectionId, Vec<Index>> = HashMap::new();
        for index in indexes {
            by_collection
                .entry(index.collection().clone())
                .or_default()
                .push(index);
        }
        Indexer { by_collection }
    }

    /// The definitions applying to `collection`, in definition order.
    pub fn indexes_for(&self, collection: &CollectionId) -> &[Index] {
        self.by_collection
            .get(collection)
            .map(|indexes| indexes.as_slice())
            .unwrap_or(&[])
    }

    pub fn index(&self, document: &Document) -> Vec<IndexEntry> {
        self.indexes_for(document.collection())
            .iter()
            .filter_map(|index| Self::entry_for(index, document))
            .collect()
    }

    fn entry_for(index: &Index, document: &Document) -> Option<IndexEntry> {
        let values = index
            .fields()
            .iter()
            .map(|field| {
                document
                    .get(field.path())
                    .map(|value| IndexValue::new(value.clone(), field.direction()))
            })
            .collect::<Option<Vec<_>>>();

        match values {
            Some(values) => match IndexEntry::new(index.name().clone(), values) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    // unreachable for a validated index, which always has fields
                    log::error!("Skipping index {}: {}", index.name(), err);
                    None
                }
            },
            None => {
                log::trace!("Document {} is not covered by index {}", document.path(), index.name());
                None
            }
        }
    }
}
