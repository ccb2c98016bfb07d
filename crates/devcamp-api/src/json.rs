//! Rendering stored documents as plain JSON.
//!
//! `serde_json` would print BSON-specific values in extended JSON
//! (`{"$date": ...}`); responses carry RFC 3339 strings and hex ids instead.

use bson::{Bson, Document};
use serde_json::{Map, Number, Value};

pub fn document(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(k, v)| (k, value(v)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn documents(docs: Vec<Document>) -> Vec<Value> {
    docs.into_iter().map(document).collect()
}

pub fn value(bson: Bson) -> Value {
    match bson {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        Bson::Double(n) => Number::from_f64(n).map_or(Value::Null, Value::Number),
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Array(items) => Value::Array(items.into_iter().map(value).collect()),
        Bson::Document(doc) => document(doc),
        other => serde_json::to_value(&other).unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use serde_json::json;

    #[test]
    fn dates_render_as_rfc3339() {
        let dt = bson::DateTime::parse_rfc3339_str("2024-05-01T12:00:00Z").unwrap();
        let rendered = document(doc! { "_id": "a", "createdAt": dt });
        assert_eq!(
            rendered,
            json!({ "_id": "a", "createdAt": "2024-05-01T12:00:00Z" })
        );
    }

    #[test]
    fn nested_values_are_converted() {
        let rendered = document(doc! {
            "careers": ["Web Development"],
            "bootcamp": { "_id": "b", "name": "Devworks" },
            "averageCost": 9010_i64,
            "averageRating": 6.5,
            "housing": true,
            "website": Bson::Null
        });
        assert_eq!(
            rendered,
            json!({
                "careers": ["Web Development"],
                "bootcamp": { "_id": "b", "name": "Devworks" },
                "averageCost": 9010,
                "averageRating": 6.5,
                "housing": true,
                "website": null
            })
        );
    }
}
