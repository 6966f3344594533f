pub mod collapse;
pub mod condition;
pub mod fields;
pub mod key;
pub mod report;
pub mod values;

pub use collapse::{Collapsed, CollapseError, CollapseMode, CollapsedValue, collapse, collapse_str};
pub use condition::{resolve_all, resolve_one, resolve_or_keep};
pub use fields::{
    AbiInput, ExpectType, FieldDescriptor, FieldNode, FieldType, input_data_from_abi,
    map_in_required, serialize_fields,
};
pub use key::{ABI_ARG_TAG, DecodeError, EncodedKey, Orientation, build_key, decode_key};
pub use report::{ErrorToast, FormErrorReport, SUBMIT_ERROR_TITLE, handle_form_error};
pub use values::{ConditionalValue, FlatValues, FormValue};
