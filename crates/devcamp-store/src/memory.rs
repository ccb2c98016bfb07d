use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use arc_swap::ArcSwap;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use devcamp_query::FilterPredicate;
use imbl::OrdMap;

use crate::error::StoreError;
use crate::eval::matches;
use crate::exec::{apply_projection, apply_sort};
use crate::find::Find;
use crate::store::DocumentStore;
use crate::{CREATED_AT_FIELD, ID_FIELD};

/// Documents of one collection, keyed by `_id`.
type Collection = OrdMap<String, Document>;

/// In-memory document store.
///
/// Every collection is a persistent map behind an `ArcSwap`: readers load a
/// snapshot without locking, writers clone the map (cheap due to structural
/// sharing), mutate it under the store-wide write lock and publish it.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Arc<ArcSwap<Collection>>>>,
    write_lock: Mutex<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_collections<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let store = Self::new();
        {
            let mut collections = store
                .collections
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            for name in names {
                collections.insert(name.to_string(), empty_collection());
            }
        }
        store
    }

    fn handle(&self, name: &str) -> Result<Arc<ArcSwap<Collection>>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|e| StoreError::Storage(format!("collection map poisoned: {e}")))?;
        collections
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
    }

    fn snapshot(&self, name: &str) -> Result<Arc<Collection>, StoreError> {
        Ok(self.handle(name)?.load_full())
    }

    /// Run `f` against a private copy of the collection and publish the
    /// result if it succeeds.
    fn write<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Collection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let handle = self.handle(name)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Storage(format!("write lock poisoned: {e}")))?;

        let mut data = (**handle.load()).clone();
        let out = f(&mut data)?;
        handle.store(Arc::new(data));
        Ok(out)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_collection() -> Arc<ArcSwap<Collection>> {
    Arc::new(ArcSwap::new(Arc::new(OrdMap::new())))
}

fn not_found(collection: &str, id: &str) -> StoreError {
    StoreError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

impl DocumentStore for MemoryStore {
    fn create_collection(&self, name: &str) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| StoreError::Storage(format!("collection map poisoned: {e}")))?;
        collections
            .entry(name.to_string())
            .or_insert_with(empty_collection);
        Ok(())
    }

    fn count(&self, collection: &str) -> Result<u64, StoreError> {
        Ok(self.snapshot(collection)?.len() as u64)
    }

    fn find(&self, collection: &str, find: &Find) -> Result<Vec<Document>, StoreError> {
        let snapshot = self.snapshot(collection)?;

        let mut docs: Vec<Document> = snapshot
            .values()
            .filter(|doc| matches(doc, &find.filter))
            .cloned()
            .collect();

        apply_sort(&mut docs, &find.sort);

        let take = find.take.unwrap_or(usize::MAX);
        let mut page: Vec<Document> = docs.into_iter().skip(find.skip).take(take).collect();

        if let Some(columns) = &find.columns {
            for doc in &mut page {
                apply_projection(doc, columns);
            }
        }

        Ok(page)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.snapshot(collection)?.get(id).cloned())
    }

    fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError> {
        let id = match doc.get(ID_FIELD) {
            None => ObjectId::new().to_hex(),
            Some(Bson::String(id)) if !id.is_empty() => id.clone(),
            Some(other) => {
                return Err(StoreError::InvalidDocument(format!(
                    "{ID_FIELD} must be a non-empty string, got {other}"
                )));
            }
        };

        let mut stored = Document::new();
        stored.insert(ID_FIELD, id.clone());
        for (key, value) in doc {
            if key != ID_FIELD {
                stored.insert(key, value);
            }
        }
        if !stored.contains_key(CREATED_AT_FIELD) {
            stored.insert(CREATED_AT_FIELD, bson::DateTime::now());
        }

        self.write(collection, |data| {
            if data.contains_key(&id) {
                return Err(StoreError::DuplicateId {
                    collection: collection.to_string(),
                    id: id.clone(),
                });
            }
            data.insert(id.clone(), stored.clone());
            Ok(())
        })?;

        Ok(stored)
    }

    fn update(
        &self,
        collection: &str,
        id: &str,
        changes: Document,
    ) -> Result<Document, StoreError> {
        self.write(collection, |data| {
            let mut doc = data.get(id).cloned().ok_or_else(|| not_found(collection, id))?;
            for (key, value) in changes {
                if key == ID_FIELD {
                    continue;
                }
                match value {
                    Bson::Null => {
                        doc.remove(&key);
                    }
                    value => {
                        doc.insert(key, value);
                    }
                }
            }
            data.insert(id.to_string(), doc.clone());
            Ok(doc)
        })
    }

    fn delete(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        self.write(collection, |data| {
            data.remove(id).ok_or_else(|| not_found(collection, id))
        })
    }

    fn delete_many(&self, collection: &str, filter: &FilterPredicate) -> Result<u64, StoreError> {
        self.write(collection, |data| {
            let doomed: Vec<String> = data
                .iter()
                .filter(|(_, doc)| matches(doc, filter))
                .map(|(id, _)| id.clone())
                .collect();
            for id in &doomed {
                data.remove(id);
            }
            Ok(doomed.len() as u64)
        })
    }
}
