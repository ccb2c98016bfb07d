use bson::{Bson, Document};

use crate::error::ListError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Bool,
    StringArray,
}

impl FieldKind {
    fn accepts(&self, value: &Bson) -> bool {
        match self {
            FieldKind::String => matches!(value, Bson::String(_)),
            FieldKind::Number => matches!(value, Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_)),
            FieldKind::Bool => matches!(value, Bson::Boolean(_)),
            FieldKind::StringArray => match value {
                Bson::Array(items) => items.iter().all(|i| matches!(i, Bson::String(_))),
                _ => false,
            },
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Number => "a number",
            FieldKind::Bool => "a boolean",
            FieldKind::StringArray => "a list of strings",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub max_len: Option<usize>,
    pub range: Option<(f64, f64)>,
    pub one_of: &'static [&'static str],
}

impl FieldRule {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            max_len: None,
            range: None,
            one_of: &[],
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn max_len(mut self, n: usize) -> Self {
        self.max_len = Some(n);
        self
    }

    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.one_of = values;
        self
    }

    fn check(&self, value: &Bson, errors: &mut Vec<String>) {
        let name = self.name;
        if !self.kind.accepts(value) {
            errors.push(format!("{name} must be {}", self.kind.describe()));
            return;
        }
        if let (Some(max), Bson::String(s)) = (self.max_len, value) {
            if s.chars().count() > max {
                errors.push(format!("{name} can not be more than {max} characters"));
            }
        }
        if let Some((min, max)) = self.range {
            let n = match value {
                Bson::Int32(n) => *n as f64,
                Bson::Int64(n) => *n as f64,
                Bson::Double(n) => *n,
                _ => return,
            };
            if n < min || n > max {
                errors.push(format!("{name} must be between {min} and {max}"));
            }
        }
        if !self.one_of.is_empty() {
            if let Bson::String(s) = value {
                if !self.one_of.contains(&s.as_str()) {
                    errors.push(format!("{name} must be one of: {}", self.one_of.join(", ")));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// Writable fields of a resource and the rules they obey.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub fields: Vec<FieldRule>,
    pub unique: Vec<&'static str>,
}

impl Schema {
    /// Drop every field the schema does not declare.
    pub fn sanitize(&self, body: Document) -> Document {
        body.into_iter()
            .filter(|(key, _)| self.fields.iter().any(|f| f.name == key.as_str()))
            .collect()
    }

    /// Check a sanitized body. On create every required field must be
    /// present; on update only the supplied fields are checked, and a
    /// required field may not be cleared with `null`.
    pub fn validate(&self, body: &Document, mode: WriteMode) -> Result<(), ListError> {
        let mut errors = Vec::new();

        for rule in &self.fields {
            match body.get(rule.name) {
                None if mode == WriteMode::Create && rule.required => {
                    errors.push(format!("{} is required", rule.name));
                }
                None => {}
                Some(Bson::Null) if rule.required => {
                    errors.push(format!("{} is required", rule.name));
                }
                Some(Bson::Null) => {}
                Some(value) => rule.check(value, &mut errors),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ListError::Validation(errors.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn schema() -> Schema {
        Schema {
            fields: vec![
                FieldRule::new("title", FieldKind::String).required().max_len(5),
                FieldRule::new("rating", FieldKind::Number).required().range(1.0, 10.0),
                FieldRule::new("skill", FieldKind::String).one_of(&["beginner", "advanced"]),
            ],
            unique: vec![],
        }
    }

    #[test]
    fn sanitize_drops_undeclared_fields() {
        let body = doc! { "title": "ok", "_id": "x", "averageRating": 3 };
        assert_eq!(schema().sanitize(body), doc! { "title": "ok" });
    }

    #[test]
    fn create_requires_required_fields() {
        let err = schema().validate(&doc! {}, WriteMode::Create).unwrap_err();
        assert_eq!(err.to_string(), "title is required, rating is required");
    }

    #[test]
    fn update_checks_only_supplied_fields() {
        assert!(schema().validate(&doc! { "rating": 4 }, WriteMode::Update).is_ok());
        let err = schema()
            .validate(&doc! { "title": Bson::Null }, WriteMode::Update)
            .unwrap_err();
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn rules_report_every_violation() {
        let body = doc! { "title": "too long", "rating": 11, "skill": "expert" };
        let err = schema().validate(&body, WriteMode::Create).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("title can not be more than 5 characters"), "{msg}");
        assert!(msg.contains("rating must be between 1 and 10"), "{msg}");
        assert!(msg.contains("skill must be one of: beginner, advanced"), "{msg}");
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let err = schema()
            .validate(&doc! { "title": "a", "rating": "high" }, WriteMode::Create)
            .unwrap_err();
        assert_eq!(err.to_string(), "rating must be a number");
    }
}
