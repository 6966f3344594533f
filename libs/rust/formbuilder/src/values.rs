use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat submission mapping produced by the form-rendering layer:
/// encoded key -> submitted value. Insertion order carries no meaning;
/// ordering is recovered from the ordinal embedded in each key.
pub type FlatValues = BTreeMap<String, FormValue>;

/// A value submitted for a single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Conditional(ConditionalValue),
    Text(String),
    Number(f64),
}

impl FormValue {
    /// Empty strings and zero are treated as "field left blank" and are
    /// skipped by the collapser. Conditional objects always count.
    pub fn is_truthy(&self) -> bool {
        match self {
            FormValue::Text(text) => !text.is_empty(),
            FormValue::Number(number) => *number != 0.0,
            FormValue::Conditional(_) => true,
        }
    }

}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        FormValue::Text(text.to_string())
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        FormValue::Text(text)
    }
}

impl From<f64> for FormValue {
    fn from(number: f64) -> Self {
        FormValue::Number(number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ConditionMarker {
    #[serde(rename = "formCondition")]
    FormCondition,
}

/// A value whose concrete resolution is deferred until submit time, when
/// the caller supplies a condition key selecting one of the precomputed
/// branches. Wire shape: `{"type": "formCondition", "<branch>": "<value>", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalValue {
    #[serde(rename = "type")]
    marker: ConditionMarker,
    #[serde(flatten)]
    branches: BTreeMap<String, String>,
}

impl ConditionalValue {
    pub fn new(branches: BTreeMap<String, String>) -> Self {
        Self {
            marker: ConditionMarker::FormCondition,
            branches,
        }
    }

    pub fn branch(&self, condition: &str) -> Option<&str> {
        self.branches.get(condition).map(String::as_str)
    }
}
