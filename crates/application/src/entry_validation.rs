use email_address::EmailAddress;
use formwork_domain::{EntryDefinition, EntryType, EntryValue, ProblemCode, ProblemSet};
use url::Url;

/// Default entry validator.
///
/// Rules are checked in order and only the first match is recorded: a
/// required entry left empty is `empty`; otherwise a non-empty value that
/// fails its type's format is `invalid`.
#[must_use]
pub fn validate_entry_by_type(entry: &EntryDefinition, value: &EntryValue) -> ProblemSet {
    if entry.is_required() && value.is_empty() {
        return ProblemSet::single(ProblemCode::Empty);
    }

    let Some(text) = value.as_text().filter(|text| !text.is_empty()) else {
        return ProblemSet::new();
    };

    let is_valid = match entry.entry_type() {
        EntryType::Email => is_valid_email(text),
        EntryType::Url => is_valid_url(text),
        EntryType::Number => is_valid_number(text),
        EntryType::Integer => is_valid_integer(text),
        EntryType::Text | EntryType::Checkbox => true,
    };

    if is_valid {
        ProblemSet::new()
    } else {
        ProblemSet::single(ProblemCode::Invalid)
    }
}

/// Default value adjustment: prefixes `http://` to URLs without a scheme.
#[must_use]
pub fn normalize_url_scheme(entry: &EntryDefinition, value: EntryValue) -> EntryValue {
    match value {
        EntryValue::Text(text)
            if entry.entry_type() == EntryType::Url
                && !text.is_empty()
                && !text.contains("://") =>
        {
            EntryValue::Text(format!("http://{text}"))
        }
        value => value,
    }
}

/// Default input element type mapping; integers render as number inputs.
#[must_use]
pub fn default_input_element_type(entry_type: EntryType) -> &'static str {
    match entry_type {
        EntryType::Integer => "number",
        other => other.as_str(),
    }
}

/// Returns whether text is a syntactically valid email address.
#[must_use]
pub fn is_valid_email(text: &str) -> bool {
    EmailAddress::is_valid(text)
}

/// Returns whether text parses as an absolute URL.
#[must_use]
pub fn is_valid_url(text: &str) -> bool {
    Url::parse(text).is_ok_and(|url| !url.cannot_be_a_base() || url.scheme() == "mailto")
}

/// Returns whether text parses as a finite floating point number.
#[must_use]
pub fn is_valid_number(text: &str) -> bool {
    text.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Returns whether text is a base-10 integer without leading zeros.
#[must_use]
pub fn is_valid_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let has_leading_zero = digits.len() > 1 && digits.starts_with('0');

    !digits.is_empty()
        && digits.bytes().all(|byte| byte.is_ascii_digit())
        && !has_leading_zero
        && text.parse::<i64>().is_ok()
}
