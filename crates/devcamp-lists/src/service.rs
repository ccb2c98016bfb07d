use std::sync::{Mutex, MutexGuard};

use bson::{Bson, Document};
use devcamp_query::{FilterPredicate, ListEnvelope, ListQuery, Pagination, QueryParams, Sort};
use devcamp_store::{CREATED_AT_FIELD, DocumentStore, Find, ID_FIELD, StoreError};
use tracing::{debug, info};

use crate::error::ListError;
use crate::resource::{ParentLink, Resource};
use crate::schema::WriteMode;

pub struct ListService<S: DocumentStore> {
    store: S,
    /// Held by every write from its checks (uniqueness, parent exists)
    /// through the aggregate refresh, so those steps see one consistent state.
    write_lock: Mutex<()>,
}

impl<S: DocumentStore> ListService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Filtered, sorted, projected and paginated listing of a resource.
    pub fn advanced_results(
        &self,
        resource: &Resource,
        params: &QueryParams,
    ) -> Result<ListEnvelope<Document>, ListError> {
        // 1. Translate the query string into a plan
        let query = ListQuery::translate(params, &resource.filterable)?;

        // 2. Total over the whole collection, not the filtered subset
        let total = self.store.count(resource.collection)?;

        // 3. Execute the page query
        let mut data = self.store.find(resource.collection, &Find::from(&query))?;

        // 4. Join the configured relation
        if let Some(relation) = &resource.populate {
            self.store.populate(&mut data, relation)?;
        }

        let pagination = Pagination::compute(&query.window, total);
        debug!(
            collection = resource.collection,
            conditions = query.filter.conditions.len(),
            page = query.window.page,
            limit = query.window.limit,
            total,
            returned = data.len(),
            "advanced results"
        );

        Ok(ListEnvelope::new(data, pagination))
    }

    /// All children of one parent, newest first, without pagination.
    pub fn list_children(
        &self,
        resource: &Resource,
        parent_id: &str,
    ) -> Result<Vec<Document>, ListError> {
        let parent = parent_of(resource)?;
        self.require(parent.collection, "Bootcamp", parent_id)?;

        let find = Find {
            sort: Sort::default_order(),
            ..Find::filter(FilterPredicate::eq(parent.field, parent_id))
        };
        Ok(self.store.find(resource.collection, &find)?)
    }

    /// One document, with its relation joined.
    pub fn get(&self, resource: &Resource, id: &str) -> Result<Document, ListError> {
        let doc = self.require(resource.collection, resource.name, id)?;
        let mut docs = [doc];
        if let Some(relation) = &resource.populate {
            self.store.populate(&mut docs, relation)?;
        }
        let [doc] = docs;
        Ok(doc)
    }

    pub fn create(&self, resource: &Resource, body: Document) -> Result<Document, ListError> {
        if resource.parent.is_some() {
            return Err(ListError::Validation(format!(
                "{} must be created under its bootcamp",
                resource.name
            )));
        }
        let _guard = self.exclusive()?;
        self.insert_validated(resource, body, Document::new())
    }

    /// Create a child document attached to an existing parent.
    pub fn create_child(
        &self,
        resource: &Resource,
        parent_id: &str,
        body: Document,
    ) -> Result<Document, ListError> {
        let parent = parent_of(resource)?;
        let _guard = self.exclusive()?;
        self.require(parent.collection, "Bootcamp", parent_id)?;

        let mut preset = Document::new();
        preset.insert(parent.field, parent_id);
        let created = self.insert_validated(resource, body, preset)?;
        self.refresh_aggregate(resource, parent_id)?;
        Ok(created)
    }

    /// Insert a document that brings its own `_id`, parent reference and
    /// `createdAt`, as seed data does. Parent aggregates are left to the caller.
    pub fn import(&self, resource: &Resource, mut body: Document) -> Result<Document, ListError> {
        let mut preset = Document::new();
        match body.remove(ID_FIELD) {
            Some(Bson::String(id)) => {
                preset.insert(ID_FIELD, id);
            }
            Some(other) => {
                return Err(ListError::Validation(format!(
                    "{ID_FIELD} must be a string, got {other}"
                )));
            }
            None => {}
        }
        if let Some(link) = &resource.parent {
            let parent_id = body
                .get_str(link.field)
                .map_err(|_| ListError::Validation(format!("{} is required", link.field)))?;
            preset.insert(link.field, parent_id.to_string());
        }
        if let Some(created_at) = body.remove(CREATED_AT_FIELD) {
            preset.insert(CREATED_AT_FIELD, created_at_value(created_at)?);
        }

        let _guard = self.exclusive()?;
        self.insert_validated(resource, body, preset)
    }

    pub fn update(
        &self,
        resource: &Resource,
        id: &str,
        body: Document,
    ) -> Result<Document, ListError> {
        let _guard = self.exclusive()?;
        let existing = self.require(resource.collection, resource.name, id)?;

        let changes = resource.schema.sanitize(body);
        resource.schema.validate(&changes, WriteMode::Update)?;
        self.check_unique(resource, &changes, Some(id))?;

        let updated = self.store.update(resource.collection, id, changes)?;
        info!(collection = resource.collection, id, "updated");

        if let Some(parent_id) = parent_id_of(resource, &existing) {
            self.refresh_aggregate(resource, &parent_id)?;
        }
        Ok(updated)
    }

    pub fn delete(&self, resource: &Resource, id: &str) -> Result<(), ListError> {
        let _guard = self.exclusive()?;
        let existing = self.require(resource.collection, resource.name, id)?;

        for child in &resource.cascade {
            let removed = self
                .store
                .delete_many(child.collection, &FilterPredicate::eq(child.field, id))?;
            if removed > 0 {
                info!(collection = child.collection, parent = id, removed, "cascade delete");
            }
        }

        self.store.delete(resource.collection, id)?;
        info!(collection = resource.collection, id, "deleted");

        if let Some(parent_id) = parent_id_of(resource, &existing) {
            self.refresh_aggregate(resource, &parent_id)?;
        }
        Ok(())
    }

    fn insert_validated(
        &self,
        resource: &Resource,
        body: Document,
        preset: Document,
    ) -> Result<Document, ListError> {
        let mut doc = resource.schema.sanitize(body);
        resource.schema.validate(&doc, WriteMode::Create)?;
        self.check_unique(resource, &doc, None)?;

        // Fields the caller sets itself, outside the writable schema
        for (key, value) in preset {
            doc.insert(key, value);
        }

        let created = self.store.insert(resource.collection, doc)?;
        info!(
            collection = resource.collection,
            id = created.get_str(ID_FIELD).unwrap_or_default(),
            "created"
        );
        Ok(created)
    }

    fn check_unique(
        &self,
        resource: &Resource,
        doc: &Document,
        own_id: Option<&str>,
    ) -> Result<(), ListError> {
        for field in &resource.schema.unique {
            let Some(value) = doc.get(*field) else {
                continue;
            };
            if matches!(value, Bson::Null) {
                continue;
            }
            let clashes = self
                .store
                .find(
                    resource.collection,
                    &Find::filter(FilterPredicate::eq(*field, value.clone())),
                )?
                .iter()
                .any(|d| d.get_str(ID_FIELD).ok() != own_id);
            if clashes {
                return Err(ListError::Duplicate((*field).to_string()));
            }
        }
        Ok(())
    }

    fn refresh_aggregate(&self, resource: &Resource, parent_id: &str) -> Result<(), ListError> {
        if let (Some(aggregate), Some(parent)) = (&resource.aggregate, &resource.parent) {
            aggregate.recompute(&self.store, resource.collection, parent, parent_id)?;
        }
        Ok(())
    }

    fn exclusive(&self) -> Result<MutexGuard<'_, ()>, ListError> {
        self.write_lock
            .lock()
            .map_err(|e| StoreError::Storage(format!("service write lock poisoned: {e}")).into())
    }

    fn require(&self, collection: &str, kind: &str, id: &str) -> Result<Document, ListError> {
        self.store
            .get(collection, id)?
            .ok_or_else(|| ListError::not_found(kind, id))
    }
}

fn parent_of(resource: &Resource) -> Result<&ParentLink, ListError> {
    resource.parent.as_ref().ok_or_else(|| {
        ListError::Validation(format!("{} has no parent resource", resource.name))
    })
}

fn parent_id_of(resource: &Resource, doc: &Document) -> Option<String> {
    let parent = resource.parent.as_ref()?;
    doc.get_str(parent.field).ok().map(str::to_string)
}

fn created_at_value(value: Bson) -> Result<Bson, ListError> {
    match value {
        Bson::DateTime(dt) => Ok(Bson::DateTime(dt)),
        Bson::String(s) => bson::DateTime::parse_rfc3339_str(&s)
            .map(Bson::DateTime)
            .map_err(|_| ListError::Validation(format!("{CREATED_AT_FIELD} must be an RFC 3339 date"))),
        other => Err(ListError::Validation(format!(
            "{CREATED_AT_FIELD} must be an RFC 3339 date, got {other}"
        ))),
    }
}
