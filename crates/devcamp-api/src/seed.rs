use std::fmt;
use std::path::Path;

use bson::Document;
use devcamp_lists::{ListError, ListService, Resources};
use devcamp_store::{DocumentStore, Find, ID_FIELD};
use serde::Deserialize;
use tracing::info;

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    List(ListError),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io(e) => write!(f, "failed to read seed file: {e}"),
            SeedError::Parse(e) => write!(f, "failed to parse seed file: {e}"),
            SeedError::List(e) => write!(f, "failed to load seed data: {e}"),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<std::io::Error> for SeedError {
    fn from(e: std::io::Error) -> Self {
        SeedError::Io(e)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(e: serde_json::Error) -> Self {
        SeedError::Parse(e)
    }
}

impl From<ListError> for SeedError {
    fn from(e: ListError) -> Self {
        SeedError::List(e)
    }
}

/// Startup data: `{"bootcamps": [...], "courses": [...], "reviews": [...]}`.
/// Documents may carry their own `_id`; courses and reviews reference their
/// bootcamp by that id.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub bootcamps: Vec<Document>,
    #[serde(default)]
    pub courses: Vec<Document>,
    #[serde(default)]
    pub reviews: Vec<Document>,
}

impl Seed {
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Insert everything, then compute each bootcamp's averages. Returns the
    /// number of documents inserted.
    pub fn load<S: DocumentStore>(
        self,
        lists: &ListService<S>,
        resources: &Resources,
    ) -> Result<usize, SeedError> {
        let mut inserted = 0;
        for (resource, docs) in [
            (&resources.bootcamps, self.bootcamps),
            (&resources.courses, self.courses),
            (&resources.reviews, self.reviews),
        ] {
            let count = docs.len();
            for doc in docs {
                lists.import(resource, doc)?;
            }
            inserted += count;
            info!(collection = resource.collection, count, "seeded");
        }

        let store = lists.store();
        let bootcamps = store
            .find(resources.bootcamps.collection, &Find::default())
            .map_err(ListError::from)?;
        for child in [&resources.courses, &resources.reviews] {
            let (Some(aggregate), Some(parent)) = (&child.aggregate, &child.parent) else {
                continue;
            };
            for bootcamp in &bootcamps {
                if let Ok(id) = bootcamp.get_str(ID_FIELD) {
                    aggregate.recompute(store, child.collection, parent, id)?;
                }
            }
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;
    use devcamp_store::MemoryStore;

    const SEED: &str = r#"{
        "bootcamps": [{
            "_id": "5d713995b721c3bb38c1f5d0",
            "name": "Devworks Bootcamp",
            "description": "Full stack web development",
            "address": "233 Bay State Rd Boston MA 02215",
            "careers": ["Web Development", "UI/UX"],
            "housing": true
        }],
        "courses": [
            {
                "title": "Front End Web Development",
                "description": "HTML, CSS and JavaScript",
                "weeks": "8",
                "tuition": 8000,
                "minimumSkill": "beginner",
                "bootcamp": "5d713995b721c3bb38c1f5d0"
            },
            {
                "title": "Full Stack Web Development",
                "description": "Node and React",
                "weeks": "12",
                "tuition": 10001,
                "minimumSkill": "intermediate",
                "bootcamp": "5d713995b721c3bb38c1f5d0"
            }
        ],
        "reviews": [{
            "title": "Learned a ton!",
            "text": "Great instructors",
            "rating": 8,
            "bootcamp": "5d713995b721c3bb38c1f5d0"
        }]
    }"#;

    #[test]
    fn loads_and_computes_averages() {
        let resources = Resources::default();
        let lists = ListService::new(MemoryStore::with_collections(resources.collections()));

        let inserted = Seed::from_json(SEED)
            .unwrap()
            .load(&lists, &resources)
            .unwrap();
        assert_eq!(inserted, 4);

        let camp = lists
            .store()
            .get("bootcamps", "5d713995b721c3bb38c1f5d0")
            .unwrap()
            .unwrap();
        assert_eq!(camp.get("averageCost"), Some(&Bson::Int64(9010)));
        assert_eq!(camp.get("averageRating"), Some(&Bson::Double(8.0)));
    }

    #[test]
    fn invalid_document_fails_the_load() {
        let resources = Resources::default();
        let lists = ListService::new(MemoryStore::with_collections(resources.collections()));
        let seed = Seed::from_json(r#"{"bootcamps": [{"name": "No description"}]}"#).unwrap();
        let err = seed.load(&lists, &resources).unwrap_err();
        assert!(matches!(err, SeedError::List(ListError::Validation(_))), "{err}");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Seed::from_json("{not json").unwrap_err(),
            SeedError::Parse(_)
        ));
    }
}
