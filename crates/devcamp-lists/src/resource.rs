use devcamp_query::FieldSet;
use devcamp_store::Relation;

use crate::aggregate::{Aggregate, Rounding};
use crate::schema::{FieldKind, FieldRule, Schema};

pub const BOOTCAMPS: &str = "bootcamps";
pub const COURSES: &str = "courses";
pub const REVIEWS: &str = "reviews";

/// Owning parent of a child resource: the reference field and the
/// collection it points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink {
    pub field: &'static str,
    pub collection: &'static str,
}

/// Everything the list service needs to know about one collection.
#[derive(Debug, Clone)]
pub struct Resource {
    /// Singular name used in messages.
    pub name: &'static str,
    pub collection: &'static str,
    pub filterable: FieldSet,
    pub populate: Option<Relation>,
    pub schema: Schema,
    pub parent: Option<ParentLink>,
    pub aggregate: Option<Aggregate>,
    /// Child collections (and their reference field) removed with a document.
    pub cascade: Vec<ParentLink>,
}

const BOOTCAMP_PARENT: ParentLink = ParentLink {
    field: "bootcamp",
    collection: BOOTCAMPS,
};

impl Resource {
    pub fn bootcamps() -> Self {
        Self {
            name: "Bootcamp",
            collection: BOOTCAMPS,
            filterable: FieldSet::new([
                "name",
                "careers",
                "housing",
                "jobAssistance",
                "jobGuarantee",
                "acceptGi",
                "averageCost",
                "averageRating",
                "createdAt",
            ]),
            populate: None,
            schema: Schema {
                fields: vec![
                    FieldRule::new("name", FieldKind::String).required().max_len(50),
                    FieldRule::new("description", FieldKind::String)
                        .required()
                        .max_len(500),
                    FieldRule::new("website", FieldKind::String),
                    FieldRule::new("phone", FieldKind::String).max_len(20),
                    FieldRule::new("email", FieldKind::String),
                    FieldRule::new("address", FieldKind::String).required(),
                    FieldRule::new("careers", FieldKind::StringArray).required(),
                    FieldRule::new("housing", FieldKind::Bool),
                    FieldRule::new("jobAssistance", FieldKind::Bool),
                    FieldRule::new("jobGuarantee", FieldKind::Bool),
                    FieldRule::new("acceptGi", FieldKind::Bool),
                ],
                unique: vec!["name"],
            },
            parent: None,
            aggregate: None,
            cascade: vec![
                ParentLink {
                    field: "bootcamp",
                    collection: COURSES,
                },
                ParentLink {
                    field: "bootcamp",
                    collection: REVIEWS,
                },
            ],
        }
    }

    pub fn courses() -> Self {
        Self {
            name: "Course",
            collection: COURSES,
            filterable: FieldSet::new([
                "title",
                "weeks",
                "tuition",
                "minimumSkill",
                "scholarshipAvailable",
                "bootcamp",
                "createdAt",
            ]),
            populate: Some(
                Relation::new("bootcamp", BOOTCAMPS).with_columns(["name", "description"]),
            ),
            schema: Schema {
                fields: vec![
                    FieldRule::new("title", FieldKind::String).required(),
                    FieldRule::new("description", FieldKind::String).required(),
                    FieldRule::new("weeks", FieldKind::String).required(),
                    FieldRule::new("tuition", FieldKind::Number).required(),
                    FieldRule::new("minimumSkill", FieldKind::String)
                        .required()
                        .one_of(&["beginner", "intermediate", "advanced"]),
                    FieldRule::new("scholarshipAvailable", FieldKind::Bool),
                ],
                unique: vec![],
            },
            parent: Some(BOOTCAMP_PARENT),
            aggregate: Some(Aggregate {
                source: "tuition",
                target: "averageCost",
                rounding: Rounding::CeilToTen,
            }),
            cascade: vec![],
        }
    }

    pub fn reviews() -> Self {
        Self {
            name: "Review",
            collection: REVIEWS,
            filterable: FieldSet::new(["title", "rating", "bootcamp", "createdAt"]),
            populate: Some(
                Relation::new("bootcamp", BOOTCAMPS).with_columns(["name", "description"]),
            ),
            schema: Schema {
                fields: vec![
                    FieldRule::new("title", FieldKind::String).required().max_len(100),
                    FieldRule::new("text", FieldKind::String).required(),
                    FieldRule::new("rating", FieldKind::Number)
                        .required()
                        .range(1.0, 10.0),
                ],
                unique: vec![],
            },
            parent: Some(BOOTCAMP_PARENT),
            aggregate: Some(Aggregate {
                source: "rating",
                target: "averageRating",
                rounding: Rounding::Exact,
            }),
            cascade: vec![],
        }
    }
}

/// The resources served by the API.
#[derive(Debug, Clone)]
pub struct Resources {
    pub bootcamps: Resource,
    pub courses: Resource,
    pub reviews: Resource,
}

impl Resources {
    pub fn collections(&self) -> [&'static str; 3] {
        [
            self.bootcamps.collection,
            self.courses.collection,
            self.reviews.collection,
        ]
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            bootcamps: Resource::bootcamps(),
            courses: Resource::courses(),
            reviews: Resource::reviews(),
        }
    }
}
