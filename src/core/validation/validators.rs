//! Reusable attribute validators
//!
//! A validator inspects the string form of one attribute (`None` when the
//! attribute is absent) and returns the rule's message when it is violated.

/// Check whether a value is absent, empty or whitespace-only
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}

/// Validator: attribute must not be blank
pub fn presence() -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    |value: Option<&str>| {
        if is_blank(value) {
            Err("can't be blank".to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: attribute must be one of `allowed`
///
/// An absent value is not in the list either, so a missing enumerated
/// attribute reports both presence and inclusion.
pub fn inclusion(
    allowed: &'static [&'static str],
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |value: Option<&str>| match value {
        Some(s) if allowed.contains(&s) => Ok(()),
        _ => Err("is not included in the list".to_string()),
    }
}
