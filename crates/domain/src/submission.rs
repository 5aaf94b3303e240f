use formwork_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Returns whether a value is present and non-empty.
///
/// `null`, `false`, `""`, `[]` and `{}` are empty. Numbers and every other
/// string, including `"0"`, count as filled.
#[must_use]
pub fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(_) => true,
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Facts supplied by the host environment for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalContext(Map<String, Value>);

impl ExternalContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one named fact.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Creates a context from a JSON object.
    pub fn from_value(value: Value) -> AppResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            Value::Null => Ok(Self::default()),
            _ => Err(AppError::Validation(
                "external values must be a JSON object".to_owned(),
            )),
        }
    }

    /// Returns a fact by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a fact only when it is present and non-empty.
    #[must_use]
    pub fn filled(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| is_filled(value))
    }
}

/// Working copy of the values submitted for one form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmittedValues(Map<String, Value>);

impl SubmittedValues {
    /// Creates values from an entry-id keyed map.
    #[must_use]
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self(values)
    }

    /// Returns a submitted value by entry id.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a submitted value only when it is present and non-empty.
    #[must_use]
    pub fn filled(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| is_filled(value))
    }

    /// Returns whether the key was submitted at all.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Overwrites one slot.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Returns the number of submitted keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw request data keyed by form base id, then by entry id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSubmission(Map<String, Value>);

impl RawSubmission {
    /// Creates an empty submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a submission from a decoded JSON body.
    pub fn from_value(value: Value) -> AppResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            Value::Null => Ok(Self::default()),
            _ => Err(AppError::Validation(
                "submission payload must be a JSON object".to_owned(),
            )),
        }
    }

    /// Builds the nested mapping from url-encoded `baseId[entryId]` pairs.
    ///
    /// Plain keys become top-level strings. Later pairs overwrite earlier
    /// ones. Keys with unbalanced or nested brackets are skipped.
    pub fn from_form_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut fields = Map::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = Value::String(value.into());

            match split_bracketed_key(key) {
                Some((outer, Some(inner))) => {
                    let slot = fields
                        .entry(outer.to_owned())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if !slot.is_object() {
                        *slot = Value::Object(Map::new());
                    }
                    if let Value::Object(nested) = slot {
                        nested.insert(inner.to_owned(), value);
                    }
                }
                Some((outer, None)) => {
                    fields.insert(outer.to_owned(), value);
                }
                None => debug!(key, "skipping malformed form field name"),
            }
        }

        Self(fields)
    }

    /// Adds the values submitted for one form.
    #[must_use]
    pub fn with_form(mut self, base_id: impl Into<String>, values: Value) -> Self {
        self.0.insert(base_id.into(), values);
        self
    }

    /// Returns the working copy of values for one form.
    ///
    /// `None` means the form is not being submitted: the key is absent,
    /// `null`, or an empty object.
    pub fn values_for(&self, base_id: &str) -> AppResult<Option<SubmittedValues>> {
        match self.0.get(base_id) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(values)) if values.is_empty() => Ok(None),
            Some(Value::Object(values)) => Ok(Some(SubmittedValues(values.clone()))),
            Some(_) => Err(AppError::Validation(format!(
                "submitted values for form '{base_id}' must be an object keyed by entry id"
            ))),
        }
    }
}

fn split_bracketed_key(key: &str) -> Option<(&str, Option<&str>)> {
    let Some(open) = key.find('[') else {
        return (!key.is_empty() && !key.contains(']')).then_some((key, None));
    };

    let outer = &key[..open];
    let rest = &key[open + 1..];
    let inner = rest.strip_suffix(']')?;

    if outer.is_empty() || inner.is_empty() || inner.contains('[') || inner.contains(']') {
        return None;
    }

    Some((outer, Some(inner)))
}
