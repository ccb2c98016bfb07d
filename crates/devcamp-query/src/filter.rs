use bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::QueryError;
use crate::fields::FieldSet;
use crate::operator::Operator;
use crate::params::QueryParams;
use crate::rewrite::rewrite_operators;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: Bson,
}

/// Conjunction of field conditions. An empty predicate matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub conditions: Vec<Condition>,
}

impl FilterPredicate {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::all().and(field, Operator::Eq, value)
    }

    pub fn and(mut self, field: impl Into<String>, operator: Operator, value: impl Into<Bson>) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            operator,
            value: value.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Build a predicate from the non-reserved query parameters.
    ///
    /// The candidates are nested (`cost[lte]` → `{cost: {lte: ..}}`),
    /// serialized, passed through [`rewrite_operators`] and parsed back, so
    /// only keys in operator position ever become comparisons.
    pub fn from_params(params: &QueryParams, allowed: &FieldSet) -> Result<Self, QueryError> {
        let nested = nest_params(&params.filter_candidates())?;
        let json = serde_json::to_string(&Value::Object(nested))?;
        let rewritten = rewrite_operators(&json);
        let value: Value = serde_json::from_str(&rewritten)?;
        Self::from_json(&value, allowed)
    }

    /// Parse a filter object whose operator keys are already tagged.
    pub fn from_json(value: &Value, allowed: &FieldSet) -> Result<Self, QueryError> {
        let Value::Object(entries) = value else {
            return Err(QueryError::MalformedFilter(
                "filter must be an object".into(),
            ));
        };

        let mut predicate = Self::all();
        for (field, value) in entries {
            if field.starts_with('$') {
                return Err(QueryError::MalformedFilter(format!(
                    "operator `{field}` must be applied to a field"
                )));
            }
            if !allowed.allows(field) {
                return Err(QueryError::FieldNotAllowed(field.clone()));
            }

            match value {
                Value::String(s) => {
                    predicate = predicate.and(field.as_str(), Operator::Eq, s.as_str());
                }
                Value::Object(ops) => {
                    for (key, operand) in ops {
                        let operator = Operator::from_tagged(key)
                            .ok_or_else(|| QueryError::UnknownOperator(key.clone()))?;
                        let Value::String(operand) = operand else {
                            return Err(QueryError::MalformedFilter(format!(
                                "operand of `{key}` on `{field}` must be a string"
                            )));
                        };
                        predicate = predicate.and(
                            field.as_str(),
                            operator,
                            operand_value(operator, operand),
                        );
                    }
                }
                other => {
                    return Err(QueryError::MalformedFilter(format!(
                        "unexpected value for `{field}`: {other}"
                    )));
                }
            }
        }

        Ok(predicate)
    }

    /// Render as a filter document: bare values for equality, operator
    /// sub-documents otherwise.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        for cond in &self.conditions {
            let only_eq = cond.operator == Operator::Eq
                && self
                    .conditions
                    .iter()
                    .filter(|c| c.field == cond.field)
                    .count()
                    == 1;
            if only_eq {
                doc.insert(cond.field.clone(), cond.value.clone());
                continue;
            }
            match doc.get_mut(&cond.field) {
                Some(Bson::Document(ops)) => {
                    ops.insert(cond.operator.tagged(), cond.value.clone());
                }
                _ => {
                    let mut ops = Document::new();
                    ops.insert(cond.operator.tagged(), cond.value.clone());
                    doc.insert(cond.field.clone(), ops);
                }
            }
        }
        doc
    }
}

fn operand_value(operator: Operator, operand: &str) -> Bson {
    match operator {
        Operator::In => Bson::Array(
            operand
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Bson::String(s.to_string()))
                .collect(),
        ),
        _ => Bson::String(operand.to_string()),
    }
}

/// Split `field[op]` keys into nested JSON objects.
fn nest_params(params: &QueryParams) -> Result<Map<String, Value>, QueryError> {
    let mut nested = Map::new();

    for (key, value) in params.iter() {
        let (field, op) = split_key(key)?;
        let value = Value::String(value.to_string());

        match op {
            None => {
                if nested.contains_key(field) {
                    return Err(conflict(field));
                }
                nested.insert(field.to_string(), value);
            }
            Some(op) => {
                let entry = nested
                    .entry(field.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                match entry {
                    Value::Object(ops) => {
                        ops.insert(op.to_string(), value);
                    }
                    _ => return Err(conflict(field)),
                }
            }
        }
    }

    Ok(nested)
}

fn split_key(key: &str) -> Result<(&str, Option<&str>), QueryError> {
    let invalid = || QueryError::MalformedFilter(format!("invalid parameter name: {key}"));

    match key.split_once('[') {
        None if key.contains(']') || key.is_empty() => Err(invalid()),
        None => Ok((key, None)),
        Some((field, rest)) => {
            let op = rest.strip_suffix(']').ok_or_else(invalid)?;
            if field.is_empty() || op.is_empty() || op.contains(['[', ']']) {
                return Err(invalid());
            }
            Ok((field, Some(op)))
        }
    }
}

fn conflict(field: &str) -> QueryError {
    QueryError::MalformedFilter(format!(
        "`{field}` is given both as a value and with operators"
    ))
}
