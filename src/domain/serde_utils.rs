//! Serde helpers for Discord payloads.

use serde::{Deserialize, Deserializer, Serializer};

/// Discord sends snowflakes as strings, older payloads and tests use integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSnowflake {
    Int(u64),
    Str(String),
}

impl RawSnowflake {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Int(value) => Ok(value),
            Self::Str(value) => value
                .parse::<u64>()
                .map_err(|e| E::custom(format!("invalid snowflake {value:?}: {e}"))),
        }
    }
}

/// Snowflake IDs encoded as strings on the wire.
pub mod snowflake {
    use super::{Deserialize, Deserializer, RawSnowflake, Serializer};

    /// Serializes a snowflake as its decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    /// Deserializes a snowflake from a string or an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither, or the string is not numeric.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawSnowflake::deserialize(deserializer)?.into_u64()
    }

    /// Nullable snowflakes.
    pub mod option {
        use super::{Deserialize, Deserializer, RawSnowflake, Serializer};

        /// Serializes an optional snowflake, `null` when absent.
        ///
        /// # Errors
        ///
        /// Returns an error if the serializer fails.
        #[allow(clippy::ref_option)]
        pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(id) => serializer.collect_str(id),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional snowflake; `null` and missing map to `None`.
        ///
        /// # Errors
        ///
        /// Returns an error if a present value is not a valid snowflake.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<RawSnowflake>::deserialize(deserializer)?
                .map(RawSnowflake::into_u64)
                .transpose()
        }
    }
}
