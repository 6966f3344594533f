use crate::key::{ABI_ARG_TAG, Orientation, build_key};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "input")]
    Input,
    #[serde(rename = "multiInput")]
    MultiInput,
}

/// Semantic value type used for client-side coercion of the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectType {
    String,
    Integer,
    Number,
    Address,
    Any,
}

/// One renderable form input, handed to the form-rendering layer.
///
/// `name` is the encoded key identifying this field in the flat
/// submission mapping; it stays unique even when the same logical field
/// set is rendered once per repeated contract-call entry. `html_for`
/// always equals `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub name: String,
    pub html_for: String,
    pub placeholder: String,
    pub expect_type: ExpectType,
    pub required: bool,
    pub listen_to: Option<String>,
}

/// A descriptor tree: leaf descriptors, or nested sequences standing in
/// for repeated sub-groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldNode {
    Field(FieldDescriptor),
    Group(Vec<FieldNode>),
}

/// One parameter descriptor from a contract function's ABI inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiInput {
    pub name: String,
    #[serde(rename = "type")]
    pub abi_type: String,
}

lazy_static! {
    static ref PLACEHOLDERS: HashMap<ExpectType, &'static str> = {
        let mut map = HashMap::new();
        map.insert(ExpectType::String, "Enter text here");
        map.insert(ExpectType::Number, "Numbers only");
        map.insert(ExpectType::Integer, "uInt 256");
        map.insert(ExpectType::Address, "0x");
        map
    };
}

// Case-sensitive on the raw ABI type string.
fn expect_type_for(abi_type: &str) -> ExpectType {
    if abi_type == "string" {
        ExpectType::String
    } else if abi_type == "address" {
        ExpectType::Address
    } else if abi_type.contains("int") {
        ExpectType::Integer
    } else if abi_type == "fixed" || abi_type == "ufixed" {
        ExpectType::Number
    } else {
        ExpectType::Any
    }
}

/// Maps a contract function's ABI inputs to renderable field
/// descriptors, order preserved.
///
/// Keys are suffix-encoded with the `ABI_ARG` tag and the parameter's
/// position, so decode order is stable even when two parameters share a
/// name. `serial_tag` disambiguates the base names when the same input
/// list appears multiple times in one rendered form.
pub fn input_data_from_abi(inputs: &[AbiInput], serial_tag: Option<&str>) -> Vec<FieldDescriptor> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let expect_type = expect_type_for(&input.abi_type);
            let is_multi = input.abi_type.ends_with("[]");

            let base_name = match serial_tag {
                Some(tag) => format!("{tag}{}", input.name),
                None => input.name.clone(),
            };
            let name = build_key(&base_name, index as u32, ABI_ARG_TAG, Orientation::Suffix);

            FieldDescriptor {
                field_type: if is_multi { FieldType::MultiInput } else { FieldType::Input },
                label: input.name.clone(),
                html_for: name.clone(),
                name,
                placeholder: PLACEHOLDERS
                    .get(&expect_type)
                    .map(|placeholder| placeholder.to_string())
                    .unwrap_or_else(|| input.abi_type.clone()),
                // arrays carry structured values and are not scalar-coerced
                expect_type: if is_multi { ExpectType::Any } else { expect_type },
                required: false,
                listen_to: None,
            }
        })
        .collect()
}

/// Marks the descriptors whose `name` appears in `required`, recursing
/// through nested groups. Returns a new tree; the input is never
/// mutated. No-op clone when `required` is empty.
pub fn map_in_required(fields: &[FieldNode], required: &[String]) -> Vec<FieldNode> {
    if required.is_empty() {
        return fields.to_vec();
    }
    fields.iter().map(|node| mark_required(node, required)).collect()
}

fn mark_required(node: &FieldNode, required: &[String]) -> FieldNode {
    match node {
        FieldNode::Group(children) => FieldNode::Group(
            children
                .iter()
                .map(|child| mark_required(child, required))
                .collect(),
        ),
        FieldNode::Field(field) => {
            if required.iter().any(|name| name == &field.name) {
                let mut marked = field.clone();
                marked.required = true;
                FieldNode::Field(marked)
            } else {
                FieldNode::Field(field.clone())
            }
        }
    }
}

/// Prefix-re-tags every field name (and `listen_to` target) in a set of
/// descriptor columns with the repeat ordinal, keeping names unique when
/// one logical field set is rendered once per repeated entry.
pub fn serialize_fields(
    columns: &[Vec<FieldDescriptor>],
    ordinal: u32,
    tag: &str,
) -> Vec<Vec<FieldDescriptor>> {
    columns
        .iter()
        .map(|column| {
            column
                .iter()
                .map(|field| {
                    let name = build_key(&field.name, ordinal, tag, Orientation::Prefix);
                    FieldDescriptor {
                        html_for: name.clone(),
                        name,
                        listen_to: field
                            .listen_to
                            .as_deref()
                            .map(|target| build_key(target, ordinal, tag, Orientation::Prefix)),
                        ..field.clone()
                    }
                })
                .collect()
        })
        .collect()
}
