use std::collections::BTreeMap;

use formwork_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Where an auto-fill source value is copied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoFillTarget {
    /// Copy the whole source value into one entry.
    Entry(NonEmptyString),
    /// Copy `source[sub_key]` into the mapped entry, per sub-key.
    Fields(BTreeMap<String, NonEmptyString>),
}

impl AutoFillTarget {
    /// Returns every entry id written by this target.
    pub fn target_entry_ids(&self) -> Box<dyn Iterator<Item = &NonEmptyString> + '_> {
        match self {
            Self::Entry(entry_id) => Box::new(std::iter::once(entry_id)),
            Self::Fields(fields) => Box::new(fields.values()),
        }
    }
}

/// One auto-fill rule: a source key and the entries it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoFillRule {
    source_id: NonEmptyString,
    target: AutoFillTarget,
}

impl AutoFillRule {
    /// Copies the whole source value into one entry.
    pub fn into_entry(
        source_id: impl Into<String>,
        entry_id: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            source_id: NonEmptyString::new(source_id)?,
            target: AutoFillTarget::Entry(NonEmptyString::new(entry_id)?),
        })
    }

    /// Copies named sub-keys of the source value into entries.
    pub fn into_fields<I, K, E>(source_id: impl Into<String>, fields: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (K, E)>,
        K: Into<String>,
        E: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(sub_key, entry_id)| -> AppResult<(String, NonEmptyString)> {
                Ok((sub_key.into(), NonEmptyString::new(entry_id)?))
            })
            .collect::<AppResult<BTreeMap<_, _>>>()?;

        Ok(Self {
            source_id: NonEmptyString::new(source_id)?,
            target: AutoFillTarget::Fields(fields),
        })
    }

    pub(crate) fn from_parts(source_id: String, target: AutoFillTarget) -> AppResult<Self> {
        Ok(Self {
            source_id: NonEmptyString::new(source_id)?,
            target,
        })
    }

    /// Returns the external or submitted key the value is read from.
    #[must_use]
    pub fn source_id(&self) -> &NonEmptyString {
        &self.source_id
    }

    /// Returns the fill target.
    #[must_use]
    pub fn target(&self) -> &AutoFillTarget {
        &self.target
    }
}
