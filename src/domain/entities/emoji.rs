//! Discord emoji entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::ResponseError;
use crate::domain::ports::{FromResponse, RawObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmojiId(#[serde(with = "crate::domain::serde_utils::snowflake")] pub u64);

impl EmojiId {
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EmojiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EmojiId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Anything that looks like an emoji: a name and, for custom emoji, an ID.
pub trait NamedEmoji {
    /// Emoji name, or the unicode character itself for standard emoji.
    fn name(&self) -> &str;

    /// Custom emoji ID; `None` for unicode emoji.
    fn id(&self) -> Option<String>;
}

/// Emoji as returned by the Discord API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    #[serde(default)]
    id: Option<EmojiId>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    animated: bool,
    #[serde(default)]
    available: Option<bool>,
}

impl Emoji {
    /// Standard unicode emoji.
    #[must_use]
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            animated: false,
            available: None,
        }
    }

    /// Guild custom emoji.
    #[must_use]
    pub fn custom(id: impl Into<EmojiId>, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            animated,
            available: None,
        }
    }

    #[must_use]
    pub const fn emoji_id(&self) -> Option<EmojiId> {
        self.id
    }

    #[must_use]
    pub const fn is_animated(&self) -> bool {
        self.animated
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        self.id.is_some()
    }

    /// `false` only when Discord reports the emoji as unusable (lost boosts).
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.unwrap_or(true)
    }

    /// Markup used to render the emoji inside message content.
    #[must_use]
    pub fn mention(&self) -> String {
        match self.id {
            Some(id) if self.animated => format!("<a:{}:{id}>", self.name),
            Some(id) => format!("<:{}:{id}>", self.name),
            None => self.name.clone(),
        }
    }
}

impl NamedEmoji for Emoji {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

impl<C> FromResponse<C> for Emoji {
    type Args = ();

    fn new(_client: Option<&C>, raw: RawObject, _args: &()) -> Result<Self, ResponseError> {
        serde_json::from_value(Value::Object(raw))
            .map_err(|e| ResponseError::decode(std::any::type_name::<Self>(), e))
    }
}
