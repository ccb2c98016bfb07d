use bson::{Bson, Document, doc};
use devcamp_query::{FilterPredicate, Operator, Sort};
use devcamp_store::{DocumentStore, Find, MemoryStore, Relation, StoreError};

const BOOTCAMPS: &str = "bootcamps";
const COURSES: &str = "courses";

fn date(s: &str) -> bson::DateTime {
    bson::DateTime::parse_rfc3339_str(s).unwrap()
}

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::with_collections([BOOTCAMPS, COURSES]);
    for d in [
        doc! { "_id": "camp-1", "name": "Devworks", "averageCost": 10000, "createdAt": date("2024-01-01T00:00:00Z") },
        doc! { "_id": "camp-2", "name": "ModernTech", "averageCost": 13000, "createdAt": date("2024-02-01T00:00:00Z") },
        doc! { "_id": "camp-3", "name": "Codemasters", "averageCost": 9000, "createdAt": date("2024-03-01T00:00:00Z") },
    ] {
        store.insert(BOOTCAMPS, d).unwrap();
    }
    for d in [
        doc! { "_id": "course-1", "title": "Front End", "tuition": 8000, "bootcamp": "camp-1" },
        doc! { "_id": "course-2", "title": "Full Stack", "tuition": 10000, "bootcamp": "camp-1" },
        doc! { "_id": "course-3", "title": "Orphan", "tuition": 500, "bootcamp": "camp-404" },
    ] {
        store.insert(COURSES, d).unwrap();
    }
    store
}

fn ids(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.get_str("_id").unwrap()).collect()
}

#[test]
fn insert_assigns_id_and_created_at() {
    let store = MemoryStore::with_collections([BOOTCAMPS]);
    let stored = store.insert(BOOTCAMPS, doc! { "name": "New" }).unwrap();

    let id = stored.get_str("_id").unwrap();
    assert_eq!(id.len(), 24);
    assert!(matches!(stored.get("createdAt"), Some(Bson::DateTime(_))));
    assert_eq!(store.get(BOOTCAMPS, id).unwrap(), Some(stored.clone()));
}

#[test]
fn insert_rejects_duplicate_and_non_string_ids() {
    let store = seeded_store();
    let err = store.insert(BOOTCAMPS, doc! { "_id": "camp-1" }).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId { .. }), "{err}");

    let err = store.insert(BOOTCAMPS, doc! { "_id": 7 }).unwrap_err();
    assert!(matches!(err, StoreError::InvalidDocument(_)), "{err}");
}

#[test]
fn unknown_collection_is_an_error() {
    let store = MemoryStore::new();
    let err = store.count("nope").unwrap_err();
    assert!(matches!(err, StoreError::CollectionNotFound(ref n) if n == "nope"));
}

#[test]
fn count_ignores_filters() {
    let store = seeded_store();
    assert_eq!(store.count(BOOTCAMPS).unwrap(), 3);
}

#[test]
fn find_filter_sort_skip_take_project() {
    let store = seeded_store();
    let find = Find {
        filter: FilterPredicate::all().and("averageCost", Operator::Lte, "13000"),
        columns: Some(vec!["name".into()]),
        sort: vec![Sort::desc("averageCost")],
        skip: 1,
        take: Some(1),
    };
    let docs = store.find(BOOTCAMPS, &find).unwrap();
    assert_eq!(docs, vec![doc! { "_id": "camp-1", "name": "Devworks" }]);
}

#[test]
fn find_newest_first() {
    let store = seeded_store();
    let find = Find {
        sort: Sort::default_order(),
        ..Default::default()
    };
    let docs = store.find(BOOTCAMPS, &find).unwrap();
    assert_eq!(ids(&docs), ["camp-3", "camp-2", "camp-1"]);
}

#[test]
fn skip_past_end_is_empty() {
    let store = seeded_store();
    let find = Find {
        skip: 10,
        take: Some(10),
        ..Default::default()
    };
    assert!(store.find(BOOTCAMPS, &find).unwrap().is_empty());
}

#[test]
fn update_merges_and_unsets() {
    let store = seeded_store();
    let updated = store
        .update(
            BOOTCAMPS,
            "camp-1",
            doc! { "_id": "hijack", "name": "Devworks 2", "averageCost": Bson::Null },
        )
        .unwrap();
    assert_eq!(updated.get_str("_id").unwrap(), "camp-1");
    assert_eq!(updated.get_str("name").unwrap(), "Devworks 2");
    assert!(!updated.contains_key("averageCost"));
    assert!(updated.contains_key("createdAt"));
}

#[test]
fn update_and_delete_missing_is_not_found() {
    let store = seeded_store();
    assert!(matches!(
        store.update(BOOTCAMPS, "ghost", doc! {}).unwrap_err(),
        StoreError::NotFound { .. }
    ));
    assert!(matches!(
        store.delete(BOOTCAMPS, "ghost").unwrap_err(),
        StoreError::NotFound { .. }
    ));
}

#[test]
fn delete_many_removes_matching() {
    let store = seeded_store();
    let removed = store
        .delete_many(COURSES, &FilterPredicate::eq("bootcamp", "camp-1"))
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(store.count(COURSES).unwrap(), 1);
}

#[test]
fn populate_joins_projected_target() {
    let store = seeded_store();
    let mut courses = store
        .find(COURSES, &Find { sort: vec![Sort::asc("_id")], ..Default::default() })
        .unwrap();
    let relation = Relation::new("bootcamp", BOOTCAMPS).with_columns(["name"]);
    store.populate(&mut courses, &relation).unwrap();

    let joined = courses[0].get_document("bootcamp").unwrap();
    assert_eq!(joined, &doc! { "_id": "camp-1", "name": "Devworks" });
    // Dangling references become null
    assert_eq!(courses[2].get("bootcamp"), Some(&Bson::Null));
}

#[test]
fn concurrent_writers_are_serialised() {
    let store = std::sync::Arc::new(seeded_store());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    store
                        .insert(COURSES, doc! { "title": format!("t{t}-{i}"), "bootcamp": "camp-2" })
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(store.count(COURSES).unwrap(), 103);
}
