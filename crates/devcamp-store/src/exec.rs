use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use bson::{Bson, Document};
use devcamp_query::{Sort, SortDirection};

use crate::ID_FIELD;

/// Resolve a dot-notation path (`location.state`) inside a document.
pub(crate) fn get_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    match path.split_once('.') {
        None => doc.get(path),
        Some((head, rest)) => match doc.get(head)? {
            Bson::Document(sub) => get_path(sub, rest),
            _ => None,
        },
    }
}

// ── Sorting ─────────────────────────────────────────────────────

pub(crate) fn apply_sort(docs: &mut [Document], sorts: &[Sort]) {
    if sorts.is_empty() {
        return;
    }
    docs.sort_by(|a, b| {
        for sort in sorts {
            let ord = compare_field_values(get_path(a, &sort.field), get_path(b, &sort.field));
            let ord = match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

/// Missing values sort before present ones.
fn compare_field_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_two_values(a, b),
    }
}

/// Values of different types order by type (null, numbers, strings,
/// documents, arrays, booleans, dates, the rest), so the ordering stays total.
fn compare_two_values(a: &Bson, b: &Bson) -> Ordering {
    match (a, b) {
        (Bson::String(a), Bson::String(b)) => a.cmp(b),
        (Bson::Boolean(a), Bson::Boolean(b)) => a.cmp(b),
        (Bson::DateTime(a), Bson::DateTime(b)) => a.timestamp_millis().cmp(&b.timestamp_millis()),
        _ if type_rank(a) == 1 && type_rank(b) == 1 => number(a).total_cmp(&number(b)),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Bson) -> u8 {
    match value {
        Bson::Null | Bson::Undefined => 0,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) => 1,
        Bson::String(_) => 2,
        Bson::Document(_) => 3,
        Bson::Array(_) => 4,
        Bson::Boolean(_) => 5,
        Bson::DateTime(_) => 6,
        _ => 7,
    }
}

fn number(value: &Bson) -> f64 {
    match value {
        Bson::Int32(n) => *n as f64,
        Bson::Int64(n) => *n as f64,
        Bson::Double(n) => *n,
        _ => f64::NAN,
    }
}

// ── Projection ──────────────────────────────────────────────────

/// Apply projection to a document, supporting dot-notation paths.
/// Keeps `_id` always. For dotted paths like "location.city", outputs
/// `{ "location": { "city": <value> } }`, only the requested sub-path.
pub(crate) fn apply_projection(doc: &mut Document, columns: &[String]) {
    let mut flat_keys: HashSet<&str> = HashSet::new();
    // top_key → remaining sub-paths
    let mut nested: HashMap<&str, Vec<String>> = HashMap::new();

    for col in columns {
        match col.split_once('.') {
            Some((top, rest)) => nested.entry(top).or_default().push(rest.to_string()),
            None => {
                flat_keys.insert(col.as_str());
            }
        }
    }

    let keys_to_remove: Vec<String> = doc
        .keys()
        .filter(|k| {
            k.as_str() != ID_FIELD
                && !flat_keys.contains(k.as_str())
                && !nested.contains_key(k.as_str())
        })
        .cloned()
        .collect();
    for key in keys_to_remove {
        doc.remove(&key);
    }

    for (top_key, sub_paths) in &nested {
        if flat_keys.contains(top_key) {
            continue;
        }
        if let Some(Bson::Document(sub_doc)) = doc.get_mut(*top_key) {
            apply_projection(sub_doc, sub_paths);
            sub_doc.remove(ID_FIELD);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn projection_keeps_id_and_selected() {
        let mut d = doc! { "_id": "1", "name": "A", "email": "a@x.io", "phone": "555" };
        apply_projection(&mut d, &["name".into(), "email".into()]);
        assert_eq!(d, doc! { "_id": "1", "name": "A", "email": "a@x.io" });
    }

    #[test]
    fn projection_trims_nested_paths() {
        let mut d = doc! { "_id": "1", "location": { "city": "Boston", "state": "MA", "zipcode": "02118" } };
        apply_projection(&mut d, &["location.city".into()]);
        assert_eq!(d, doc! { "_id": "1", "location": { "city": "Boston" } });
    }

    #[test]
    fn sort_puts_missing_first_ascending() {
        let mut docs = vec![doc! { "n": 2 }, doc! {}, doc! { "n": 1.5 }];
        apply_sort(&mut docs, &[Sort::asc("n")]);
        assert_eq!(docs, vec![doc! {}, doc! { "n": 1.5 }, doc! { "n": 2 }]);
    }

    #[test]
    fn sort_uses_later_keys_to_break_ties() {
        let mut docs = vec![
            doc! { "cost": 5, "name": "b" },
            doc! { "cost": 9, "name": "c" },
            doc! { "cost": 5, "name": "a" },
        ];
        apply_sort(&mut docs, &[Sort::desc("cost"), Sort::asc("name")]);
        let names: Vec<&str> = docs.iter().map(|d| d.get_str("name").unwrap()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn mixed_types_sort_by_type_rank() {
        let mut docs = vec![
            doc! { "v": true },
            doc! { "v": "text" },
            doc! { "v": Bson::Null },
            doc! { "v": 3 },
            doc! { "v": f64::NAN },
            doc! { "v": ["a"] },
            doc! { "v": 1.5 },
        ];
        apply_sort(&mut docs, &[Sort::asc("v")]);
        let ranks: Vec<u8> = docs.iter().map(|d| type_rank(d.get("v").unwrap())).collect();
        assert_eq!(ranks, [0, 1, 1, 1, 2, 4, 5]);
        assert_eq!(docs[1], doc! { "v": 1.5 });
        assert_eq!(docs[2], doc! { "v": 3 });
    }
}
