use crate::key::{DecodeError, Orientation, decode_key};
use crate::values::{FlatValues, FormValue};
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

/// How grouped entries are re-assembled out of a flat submission
/// mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseMode {
    /// Ordinal-sorted value sequence; standalone entries are discarded.
    Array,
    /// `{ <flag>: sequence }` merged with the standalone entries.
    SingleField,
    /// Base-name -> sequence, values placed at index = ordinal (sparse),
    /// merged with the standalone entries.
    ObjOfArrays,
}

impl FromStr for CollapseMode {
    type Err = CollapseError;

    fn from_str(raw: &str) -> Result<Self, CollapseError> {
        match raw {
            "array" => Ok(CollapseMode::Array),
            "singleField" => Ok(CollapseMode::SingleField),
            "objOfArrays" => Ok(CollapseMode::ObjOfArrays),
            other => Err(CollapseError::InvalidCollapseMode(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum CollapseError {
    #[error("did not receive a valid collapse type: `{0}`")]
    InvalidCollapseMode(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A collapsed field entry: a standalone scalar, or a reconstructed
/// group sequence. Sequences may carry `None` gaps at skipped ordinals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CollapsedValue {
    Single(FormValue),
    Many(Vec<Option<FormValue>>),
}

/// Result of [`collapse`], shaped by the collapse mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Collapsed {
    Array(Vec<FormValue>),
    Fields(BTreeMap<String, CollapsedValue>),
}

/// Reconstructs grouped values from a flat submission mapping.
///
/// Keys containing `flag` are decoded as `ordinal*flag*base_name` and
/// re-assembled per `mode`; falsy values (blank fields) are dropped from
/// every output shape. When no key contains `flag` the original mapping
/// is handed back unchanged, falsy entries included; callers must not
/// rely on that path for filtering. Duplicate `(base_name, ordinal)`
/// pairs resolve last-write-wins in the mapping's iteration order.
pub fn collapse(values: &FlatValues, flag: &str, mode: CollapseMode) -> Result<Collapsed, CollapseError> {
    let grouped: Vec<(&str, &FormValue)> = values
        .iter()
        .filter(|(key, value)| key.contains(flag) && value.is_truthy())
        .map(|(key, value)| (key.as_str(), value))
        .collect();

    if grouped.is_empty() {
        return Ok(Collapsed::Fields(
            values
                .iter()
                .map(|(key, value)| (key.clone(), CollapsedValue::Single(value.clone())))
                .collect(),
        ));
    }

    let standalone = values
        .iter()
        .filter(|(key, value)| !key.contains(flag) && value.is_truthy());

    let mut decoded = Vec::with_capacity(grouped.len());
    for (key, value) in grouped {
        let parsed = decode_key(key, flag, Orientation::Prefix)?;
        decoded.push((parsed, value.clone()));
    }

    match mode {
        CollapseMode::ObjOfArrays => {
            let mut groups: BTreeMap<String, Vec<Option<FormValue>>> = BTreeMap::new();
            for (parsed, value) in decoded {
                let slot = parsed.ordinal as usize;
                let sequence = groups.entry(parsed.base_name).or_default();
                if sequence.len() <= slot {
                    sequence.resize(slot + 1, None);
                }
                sequence[slot] = Some(value);
            }

            let mut fields: BTreeMap<String, CollapsedValue> = groups
                .into_iter()
                .map(|(base, sequence)| (base, CollapsedValue::Many(sequence)))
                .collect();
            for (key, value) in standalone {
                fields.insert(key.clone(), CollapsedValue::Single(value.clone()));
            }
            Ok(Collapsed::Fields(fields))
        }
        CollapseMode::Array | CollapseMode::SingleField => {
            let mut ordered = decoded;
            ordered.sort_by_key(|(parsed, _)| parsed.ordinal);
            let sequence: Vec<FormValue> = ordered.into_iter().map(|(_, value)| value).collect();

            if mode == CollapseMode::Array {
                return Ok(Collapsed::Array(sequence));
            }

            let mut fields = BTreeMap::new();
            fields.insert(
                flag.to_string(),
                CollapsedValue::Many(sequence.into_iter().map(Some).collect()),
            );
            for (key, value) in standalone {
                fields.insert(key.clone(), CollapsedValue::Single(value.clone()));
            }
            Ok(Collapsed::Fields(fields))
        }
    }
}

/// [`collapse`] with the mode still in its wire form; fails with
/// [`CollapseError::InvalidCollapseMode`] on anything outside the three
/// known modes.
pub fn collapse_str(values: &FlatValues, flag: &str, mode: &str) -> Result<Collapsed, CollapseError> {
    collapse(values, flag, mode.parse()?)
}
