use crate::values::FormValue;

/// Resolves a single form value against a condition key.
///
/// Plain text passes through untouched; a conditional resolves to its
/// matching branch. Everything else (a conditional with no matching
/// branch, a missing condition, a bare number) resolves to `None`,
/// which callers treat as "omit this field", not as a failure.
pub fn resolve_one(value: &FormValue, condition: Option<&str>) -> Option<FormValue> {
    match value {
        FormValue::Text(text) => Some(FormValue::Text(text.clone())),
        FormValue::Conditional(conditional) => condition
            .and_then(|branch| conditional.branch(branch))
            .map(|resolved| FormValue::Text(resolved.to_string())),
        FormValue::Number(_) => None,
    }
}

/// Element-wise [`resolve_one`] over an ordered sequence, preserving
/// order and length; unresolved entries stay as `None` placeholders.
pub fn resolve_all(values: &[FormValue], condition: Option<&str>) -> Vec<Option<FormValue>> {
    values
        .iter()
        .map(|value| resolve_one(value, condition))
        .collect()
}

/// Resolves a conditional transaction value when the branch matches,
/// otherwise hands the value back unchanged, even an unresolved
/// conditional.
pub fn resolve_or_keep(value: &FormValue, condition: &str) -> FormValue {
    if let FormValue::Conditional(conditional) = value {
        if let Some(resolved) = conditional.branch(condition) {
            return FormValue::Text(resolved.to_string());
        }
    }
    value.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::ConditionalValue;
    use std::collections::BTreeMap;

    fn conditional(branches: &[(&str, &str)]) -> FormValue {
        FormValue::Conditional(ConditionalValue::new(
            branches
                .iter()
                .map(|(branch, value)| (branch.to_string(), value.to_string()))
                .collect::<BTreeMap<_, _>>(),
        ))
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(
            resolve_one(&FormValue::from("0xabc"), Some("cancel")),
            Some(FormValue::from("0xabc"))
        );
        assert_eq!(resolve_one(&FormValue::from("0xabc"), None), Some(FormValue::from("0xabc")));
    }

    #[test]
    fn matching_branch_resolves() {
        let value = conditional(&[("cancel", "0x0"), ("execute", "0x1")]);
        assert_eq!(resolve_one(&value, Some("execute")), Some(FormValue::from("0x1")));
    }

    #[test]
    fn unmatched_branch_resolves_to_none() {
        let value = conditional(&[("cancel", "0x0")]);
        assert_eq!(resolve_one(&value, Some("execute")), None);
        assert_eq!(resolve_one(&value, None), None);
        assert_eq!(resolve_one(&FormValue::from(5.0), Some("cancel")), None);
    }

    #[test]
    fn resolve_all_preserves_order_and_length() {
        let values = vec![
            FormValue::from("literal"),
            conditional(&[("cancel", "0x0")]),
            conditional(&[("execute", "0x1")]),
        ];
        assert_eq!(
            resolve_all(&values, Some("cancel")),
            vec![Some(FormValue::from("literal")), Some(FormValue::from("0x0")), None]
        );
    }

    #[test]
    fn resolve_or_keep_falls_back_to_the_original() {
        let value = conditional(&[("cancel", "0x0")]);
        assert_eq!(resolve_or_keep(&value, "cancel"), FormValue::from("0x0"));
        assert_eq!(resolve_or_keep(&value, "execute"), value);
        assert_eq!(resolve_or_keep(&FormValue::from("plain"), "cancel"), FormValue::from("plain"));
    }
}
