//! Serde helpers for schema documents.

/// Keeps JSON object keys in document order as `(key, value)` pairs.
pub(crate) mod ordered_map {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ptr_arg)]
    pub(crate) fn serialize<S, V>(entries: &Vec<(String, V)>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub(crate) fn deserialize<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for OrderedMapVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = Vec<(String, V)>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map keyed by identifier")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Accepts either a single identifier or a list of identifiers.
pub(crate) mod one_or_many {
    use formwork_core::NonEmptyString;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(NonEmptyString),
        Many(Vec<NonEmptyString>),
        Null(()),
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<NonEmptyString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(identifier) => vec![identifier],
            OneOrMany::Many(identifiers) => identifiers,
            OneOrMany::Null(()) => Vec::new(),
        })
    }
}
