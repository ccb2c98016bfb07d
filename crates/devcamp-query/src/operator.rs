use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl Operator {
    /// Operators that may appear in brackets on a query-string key.
    pub const TOKENS: [Operator; 5] = [
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
    ];

    /// Bare token as written in a query string (`cost[lte]=...`).
    pub fn token(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
        }
    }

    /// Tagged form used in filter documents.
    pub fn tagged(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::In => "$in",
        }
    }

    pub fn from_tagged(key: &str) -> Option<Operator> {
        match key {
            "$eq" => Some(Operator::Eq),
            "$gt" => Some(Operator::Gt),
            "$gte" => Some(Operator::Gte),
            "$lt" => Some(Operator::Lt),
            "$lte" => Some(Operator::Lte),
            "$in" => Some(Operator::In),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_forms_round_trip() {
        for op in Operator::TOKENS {
            assert_eq!(Operator::from_tagged(op.tagged()), Some(op));
            assert_eq!(op.tagged(), format!("${}", op.token()));
        }
    }

    #[test]
    fn bare_token_is_not_tagged() {
        assert_eq!(Operator::from_tagged("gt"), None);
        assert_eq!(Operator::from_tagged("$ne"), None);
    }
}
