use std::cmp::Ordering;

use bson::{Bson, Document};
use devcamp_query::{Condition, FilterPredicate, Operator};

use crate::exec::get_path;

/// Whether a document satisfies every condition of the predicate.
pub fn matches(doc: &Document, filter: &FilterPredicate) -> bool {
    filter.conditions.iter().all(|cond| matches_condition(doc, cond))
}

fn matches_condition(doc: &Document, cond: &Condition) -> bool {
    let Some(stored) = get_path(doc, &cond.field) else {
        return false;
    };

    // Array fields match when any element matches
    if let Bson::Array(elems) = stored {
        return elems.iter().any(|e| matches_value(e, cond));
    }
    matches_value(stored, cond)
}

fn matches_value(stored: &Bson, cond: &Condition) -> bool {
    match cond.operator {
        Operator::Eq => value_eq(stored, &cond.value),
        Operator::In => match &cond.value {
            Bson::Array(candidates) => candidates.iter().any(|c| value_eq(stored, c)),
            single => value_eq(stored, single),
        },
        Operator::Gt => value_cmp(stored, &cond.value).is_some_and(|o| o == Ordering::Greater),
        Operator::Gte => value_cmp(stored, &cond.value).is_some_and(|o| o != Ordering::Less),
        Operator::Lt => value_cmp(stored, &cond.value).is_some_and(|o| o == Ordering::Less),
        Operator::Lte => value_cmp(stored, &cond.value).is_some_and(|o| o != Ordering::Greater),
    }
}

fn value_eq(stored: &Bson, query: &Bson) -> bool {
    match (stored, query) {
        (Bson::Boolean(a), Bson::String(s)) => match s.as_str() {
            "true" => *a,
            "false" => !*a,
            _ => false,
        },
        (Bson::Boolean(a), Bson::Boolean(b)) => a == b,
        _ => value_cmp(stored, query) == Some(Ordering::Equal),
    }
}

/// Ordering of a stored value relative to a query value.
///
/// Query-string operands arrive as strings, so a string query value is
/// coerced to the stored type. Incompatible types yield `None` and the
/// document is silently excluded.
fn value_cmp(stored: &Bson, query: &Bson) -> Option<Ordering> {
    match (stored, query) {
        // ── Direct type matches ─────────────────────────────────
        (Bson::String(a), Bson::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Bson::DateTime(a), Bson::DateTime(b)) => {
            Some(a.timestamp_millis().cmp(&b.timestamp_millis()))
        }
        (a, b) if as_number(a).is_some() && as_number(b).is_some() => {
            as_number(a)?.partial_cmp(&as_number(b)?)
        }

        // ── Cross-type coercion: Bson::String → stored type ─
        (Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_), Bson::String(s)) => {
            let b = s.trim().parse::<f64>().ok()?;
            as_number(stored)?.partial_cmp(&b)
        }
        (Bson::DateTime(a), Bson::String(s)) => bson::DateTime::parse_rfc3339_str(s)
            .ok()
            .map(|b| a.timestamp_millis().cmp(&b.timestamp_millis())),

        // ── Incompatible types ──────────────────────────────────
        _ => None,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(*n as f64),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}
