use thiserror::Error;

/// Tag used when flattening a contract function's ABI argument list.
pub const ABI_ARG_TAG: &str = "ABI_ARG";

/// Which side of the base name carries the `ordinal*tag*` encoding.
///
/// Repeat-group flattening prepends (`ordinal*TAG*name`), ABI argument
/// flattening appends (`name*TAG*ordinal`). A key decodes only with the
/// orientation it was encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Prefix,
    Suffix,
}

/// A flat-mapping key, decomposed. Internal logic works on this typed
/// form; the delimited string exists only at the form-rendering boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedKey {
    pub base_name: String,
    pub tag: String,
    pub ordinal: u32,
}

impl EncodedKey {
    pub fn encode(&self, orientation: Orientation) -> String {
        build_key(&self.base_name, self.ordinal, &self.tag, orientation)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("key `{key}` carries no `{tag}` tag")]
    TagMissing { key: String, tag: String },
    #[error("key `{key}` has a non-numeric ordinal in its `{tag}` slot")]
    BadOrdinal { key: String, tag: String },
}

fn delimited(tag: &str) -> String {
    format!("*{tag}*")
}

// Strips a leading run of `<digits>*tag*` occurrences.
fn strip_prefix_run<'a>(mut name: &'a str, sep: &str) -> &'a str {
    while let Some(pos) = name.find(sep) {
        if pos > 0 && name[..pos].bytes().all(|b| b.is_ascii_digit()) {
            name = &name[pos + sep.len()..];
        } else {
            break;
        }
    }
    name
}

// Strips a trailing run of `*tag*<digits>` occurrences.
fn strip_suffix_run<'a>(mut name: &'a str, sep: &str) -> &'a str {
    while let Some(pos) = name.rfind(sep) {
        let tail = &name[pos + sep.len()..];
        if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
            name = &name[..pos];
        } else {
            break;
        }
    }
    name
}

/// Encodes `base_name` with `ordinal*tag*` in the given orientation.
///
/// Re-tagging is idempotent: if `base_name` already carries an encoding
/// for `tag` on that side, the existing ordinal run is replaced rather
/// than nested, so `build_key(build_key(n, i, t, o), j, t, o)` equals
/// `build_key(n, j, t, o)`.
pub fn build_key(base_name: &str, ordinal: u32, tag: &str, orientation: Orientation) -> String {
    let sep = delimited(tag);
    match orientation {
        Orientation::Prefix => {
            format!("{ordinal}{sep}{}", strip_prefix_run(base_name, &sep))
        }
        Orientation::Suffix => {
            format!("{}{sep}{ordinal}", strip_suffix_run(base_name, &sep))
        }
    }
}

/// Inverse of [`build_key`] for the given orientation.
///
/// Splits on the first (prefix) or last (suffix) occurrence of the
/// `*tag*` token. A base name that itself contains that exact token is
/// ambiguous and will mis-split; callers own their tag vocabulary and
/// must keep the delimiter sequence out of field names.
pub fn decode_key(encoded: &str, tag: &str, orientation: Orientation) -> Result<EncodedKey, DecodeError> {
    let sep = delimited(tag);
    let (ordinal_part, base_part) = match orientation {
        Orientation::Prefix => {
            let pos = encoded.find(&sep).ok_or_else(|| DecodeError::TagMissing {
                key: encoded.to_string(),
                tag: tag.to_string(),
            })?;
            (&encoded[..pos], &encoded[pos + sep.len()..])
        }
        Orientation::Suffix => {
            let pos = encoded.rfind(&sep).ok_or_else(|| DecodeError::TagMissing {
                key: encoded.to_string(),
                tag: tag.to_string(),
            })?;
            (&encoded[pos + sep.len()..], &encoded[..pos])
        }
    };

    let ordinal = ordinal_part
        .parse::<u32>()
        .map_err(|_| DecodeError::BadOrdinal {
            key: encoded.to_string(),
            tag: tag.to_string(),
        })?;

    Ok(EncodedKey {
        base_name: base_part.to_string(),
        tag: tag.to_string(),
        ordinal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn builds_prefix_and_suffix_keys() {
        assert_eq!(build_key("amount", 2, "MULTI", Orientation::Prefix), "2*MULTI*amount");
        assert_eq!(build_key("amount", 2, "ABI_ARG", Orientation::Suffix), "amount*ABI_ARG*2");
    }

    #[test]
    fn decoded_keys_encode_back_to_the_same_string() {
        let decoded = decode_key("2*MULTI*amount", "MULTI", Orientation::Prefix).unwrap();
        assert_eq!(
            decoded,
            EncodedKey {
                base_name: "amount".to_string(),
                tag: "MULTI".to_string(),
                ordinal: 2,
            }
        );
        assert_eq!(decoded.encode(Orientation::Prefix), "2*MULTI*amount");
    }

    #[test]
    fn retagging_replaces_instead_of_nesting() {
        let once = build_key("recipient", 0, "MULTI", Orientation::Prefix);
        let twice = build_key(&once, 7, "MULTI", Orientation::Prefix);
        assert_eq!(twice, "7*MULTI*recipient");

        let once = build_key("recipient", 0, "ABI_ARG", Orientation::Suffix);
        let twice = build_key(&once, 7, "ABI_ARG", Orientation::Suffix);
        assert_eq!(twice, "recipient*ABI_ARG*7");
    }

    #[test]
    fn retagging_collapses_an_existing_run() {
        assert_eq!(
            build_key("3*MULTI*1*MULTI*recipient", 5, "MULTI", Orientation::Prefix),
            "5*MULTI*recipient"
        );
    }

    #[test]
    fn different_tags_stack() {
        let inner = build_key("amount", 1, "ABI_ARG", Orientation::Suffix);
        let outer = build_key(&inner, 0, "TX", Orientation::Prefix);
        assert_eq!(outer, "0*TX*amount*ABI_ARG*1");

        let decoded = decode_key(&outer, "TX", Orientation::Prefix).unwrap();
        assert_eq!(decoded.base_name, "amount*ABI_ARG*1");
        assert_eq!(decoded.ordinal, 0);
    }

    #[test]
    fn decode_fails_when_tag_is_missing() {
        let err = decode_key("amount", "MULTI", Orientation::Prefix).unwrap_err();
        assert!(matches!(err, DecodeError::TagMissing { .. }));
    }

    #[test]
    fn decode_fails_on_non_numeric_ordinal() {
        let err = decode_key("x*MULTI*amount", "MULTI", Orientation::Prefix).unwrap_err();
        assert!(matches!(err, DecodeError::BadOrdinal { .. }));

        let err = decode_key("*MULTI*amount", "MULTI", Orientation::Prefix).unwrap_err();
        assert!(matches!(err, DecodeError::BadOrdinal { .. }));
    }

    proptest! {
        #[test]
        fn round_trips_in_both_orientations(
            base in "[a-z][a-zA-Z0-9_]{0,15}",
            ordinal in any::<u32>(),
            tag in "[A-Z][A-Z0-9_]{0,7}",
        ) {
            for orientation in [Orientation::Prefix, Orientation::Suffix] {
                let key = build_key(&base, ordinal, &tag, orientation);
                let decoded = decode_key(&key, &tag, orientation).unwrap();
                prop_assert_eq!(&decoded.base_name, &base);
                prop_assert_eq!(decoded.ordinal, ordinal);
            }
        }

        #[test]
        fn retagging_is_idempotent(
            base in "[a-z][a-zA-Z0-9_]{0,15}",
            first in any::<u32>(),
            second in any::<u32>(),
            tag in "[A-Z][A-Z0-9_]{0,7}",
        ) {
            for orientation in [Orientation::Prefix, Orientation::Suffix] {
                let once = build_key(&base, first, &tag, orientation);
                let retagged = build_key(&once, second, &tag, orientation);
                prop_assert_eq!(retagged, build_key(&base, second, &tag, orientation));
            }
        }
    }
}
