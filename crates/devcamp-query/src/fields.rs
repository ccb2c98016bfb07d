use std::collections::BTreeSet;

/// Allow-list of fields a resource may be filtered on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: BTreeSet<String>,
}

impl FieldSet {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// A dotted path is allowed when its top-level segment is allowed.
    pub fn allows(&self, field: &str) -> bool {
        if self.fields.contains(field) {
            return true;
        }
        match field.split_once('.') {
            Some((top, rest)) if !rest.is_empty() => self.fields.contains(top),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_nested_paths() {
        let fields = FieldSet::new(["cost", "location"]);
        assert!(fields.allows("cost"));
        assert!(fields.allows("location.state"));
        assert!(!fields.allows("location."));
        assert!(!fields.allows("password"));
        assert!(!fields.allows("costs"));
    }
}
