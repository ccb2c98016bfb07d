use std::sync::LazyLock;

use regex::Regex;

/// Matches a bare operator token used as a JSON object key: `"lte":`.
///
/// Keys are always followed by an unescaped `":`, which a string value can
/// never contain, so values such as `"in person"` or `"gt":` inside a value
/// are left alone.
static OPERATOR_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""\b(gt|gte|lt|lte|in)\b"\s*:"#).expect("operator key pattern is valid")
});

/// Rewrite bare operator keys in serialized filter JSON into their tagged
/// form, so `{"cost":{"lte":"100"}}` becomes `{"cost":{"$lte":"100"}}`.
pub fn rewrite_operators(json: &str) -> String {
    OPERATOR_KEY.replace_all(json, r#""$$$1":"#).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_each_operator_key() {
        for op in ["gt", "gte", "lt", "lte", "in"] {
            let json = format!(r#"{{"cost":{{"{op}":"100"}}}}"#);
            assert_eq!(
                rewrite_operators(&json),
                format!(r#"{{"cost":{{"${op}":"100"}}}}"#)
            );
        }
    }

    #[test]
    fn leaves_values_containing_tokens_alone() {
        let json = r#"{"name":"in","description":"gt lt in gte","city":"Lincoln"}"#;
        assert_eq!(rewrite_operators(json), json);
    }

    #[test]
    fn leaves_escaped_quotes_in_values_alone() {
        let value = serde_json::json!({ "title": "\"lt\": trick" }).to_string();
        assert_eq!(rewrite_operators(&value), value);
    }

    #[test]
    fn does_not_touch_longer_keys() {
        let json = r#"{"interest":"x","ltv":{"gte":"1"}}"#;
        assert_eq!(
            rewrite_operators(json),
            r#"{"interest":"x","ltv":{"$gte":"1"}}"#
        );
    }

    #[test]
    fn already_tagged_keys_are_unchanged() {
        let json = r#"{"cost":{"$lt":"5"}}"#;
        assert_eq!(rewrite_operators(json), json);
    }
}
