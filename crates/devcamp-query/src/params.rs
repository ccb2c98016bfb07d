use std::collections::BTreeMap;

/// Control keys that never become filters.
pub const RESERVED_KEYS: [&str; 4] = ["select", "sort", "page", "limit"];

/// Raw query-string parameters, keyed by name.
///
/// Repeated keys (`careers=UX&careers=Business`) are folded into a single
/// comma-joined value, which is how multi-value fields travel through the
/// translator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.insert(key, value);
        }
        params
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        self.values
            .entry(key.into())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of the parameters with the reserved control keys removed.
    pub fn filter_candidates(&self) -> QueryParams {
        let values = self
            .values
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        QueryParams { values }
    }
}
