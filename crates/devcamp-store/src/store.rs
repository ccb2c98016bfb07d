use std::collections::HashMap;

use bson::{Bson, Document};
use devcamp_query::FilterPredicate;

use crate::error::StoreError;
use crate::exec::apply_projection;
use crate::find::Find;
use crate::relation::Relation;

/// Collection accessor used by the list service.
pub trait DocumentStore: Send + Sync {
    fn create_collection(&self, name: &str) -> Result<(), StoreError>;

    /// Number of documents in the collection, ignoring any filter.
    fn count(&self, collection: &str) -> Result<u64, StoreError>;

    fn find(&self, collection: &str, find: &Find) -> Result<Vec<Document>, StoreError>;

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Insert a document, assigning `_id` and `createdAt` when absent.
    /// Returns the stored document.
    fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError>;

    /// Shallow-merge `changes` into an existing document. `_id` is immutable
    /// and a `null` value removes the field.
    fn update(&self, collection: &str, id: &str, changes: Document)
    -> Result<Document, StoreError>;

    fn delete(&self, collection: &str, id: &str) -> Result<Document, StoreError>;

    fn delete_many(&self, collection: &str, filter: &FilterPredicate) -> Result<u64, StoreError>;

    /// Replace each document's reference field with the referenced document.
    fn populate(&self, docs: &mut [Document], relation: &Relation) -> Result<(), StoreError> {
        let mut resolved: HashMap<String, Bson> = HashMap::new();

        for doc in docs.iter_mut() {
            let id = match doc.get(&relation.field) {
                Some(Bson::String(id)) => id.clone(),
                _ => continue,
            };

            if !resolved.contains_key(&id) {
                let joined = match self.get(&relation.collection, &id)? {
                    Some(mut target) => {
                        if let Some(columns) = &relation.columns {
                            apply_projection(&mut target, columns);
                        }
                        Bson::Document(target)
                    }
                    None => Bson::Null,
                };
                resolved.insert(id.clone(), joined);
            }

            if let Some(joined) = resolved.get(&id) {
                doc.insert(relation.field.clone(), joined.clone());
            }
        }

        Ok(())
    }
}
