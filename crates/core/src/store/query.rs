use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::document::model::StoredDocument;

/// Dotted path into a document's content, e.g. `address.city`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn parse(dotted: &str) -> Self {
        FieldPath(dotted.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Resolve the path against a JSON value.
    pub fn lookup<'a>(&self, content: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(content, |value, segment| value.get(segment.as_str()))
    }
}

/// A single filter condition. Conditions in a query are ANDed.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the given JSON value.
    Eq { path: FieldPath, value: Value },
    /// Text field matches a regular expression, ignoring case.
    Matches { path: FieldPath, pattern: String },
    /// Document created at or after the instant.
    CreatedSince(DateTime<Utc>),
}

impl Condition {
    pub fn eq(path: &str, value: impl Into<Value>) -> Self {
        Condition::Eq {
            path: FieldPath::parse(path),
            value: value.into(),
        }
    }

    pub fn matches(path: &str, pattern: impl Into<String>) -> Self {
        Condition::Matches {
            path: FieldPath::parse(path),
            pattern: pattern.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    Field(FieldPath),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub descending: bool,
}

impl Sort {
    pub fn newest_first() -> Self {
        Sort {
            key: SortKey::CreatedAt,
            descending: true,
        }
    }

    pub fn desc(path: &str) -> Self {
        Sort {
            key: SortKey::Field(FieldPath::parse(path)),
            descending: true,
        }
    }

    pub fn asc(path: &str) -> Self {
        Sort {
            key: SortKey::Field(FieldPath::parse(path)),
            descending: false,
        }
    }

    /// Order two stored documents. Ties fall back to creation order so
    /// listings are stable.
    pub fn compare(&self, a: &StoredDocument, b: &StoredDocument) -> Ordering {
        let primary = match &self.key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Field(path) => compare_values(path.lookup(&a.content), path.lookup(&b.content)),
        };
        let ordering = primary
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Missing and null sort first; values of different kinds compare equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Filter, order and window over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub conditions: Vec<Condition>,
    pub sort: Sort,
    pub offset: u64,
    pub limit: Option<u64>,
}

impl Query {
    pub fn new(sort: Sort) -> Self {
        Self {
            conditions: Vec::new(),
            sort,
            offset: 0,
            limit: None,
        }
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn filters(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    pub fn window(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }
}
