//! Canonical emoji strings for the reaction endpoints.

use std::borrow::Cow;

use crate::domain::entities::NamedEmoji;

/// The shapes an emoji argument can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiRef<'a> {
    /// A name with an optional custom emoji ID.
    Structured {
        name: Cow<'a, str>,
        id: Option<String>,
    },
    /// Message markup such as `<:blob:123>` or `<a:wave:456>`.
    Token(&'a str),
    /// A unicode emoji or an already canonical `name:id` string.
    Plain(&'a str),
}

impl<'a> EmojiRef<'a> {
    /// Classifies a raw string argument.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        if raw.starts_with('<') && raw.ends_with('>') {
            Self::Token(raw)
        } else {
            Self::Plain(raw)
        }
    }

    /// Borrows the name and ID of a structured emoji.
    #[must_use]
    pub fn structured<E: NamedEmoji + ?Sized>(emoji: &'a E) -> Self {
        Self::Structured {
            name: Cow::Borrowed(emoji.name()),
            id: emoji.id(),
        }
    }

    /// Converts to the `name` or `name:id` form the API expects.
    #[must_use]
    pub fn normalize(&self) -> String {
        match self {
            Self::Structured { name, id } => match id.as_deref() {
                None | Some("") => name.to_string(),
                Some(id) => format!("{name}:{id}"),
            },
            Self::Token(raw) => strip_brackets(raw).to_string(),
            Self::Plain(raw) => (*raw).to_string(),
        }
    }
}

impl<'a> From<&'a str> for EmojiRef<'a> {
    fn from(raw: &'a str) -> Self {
        Self::parse(raw)
    }
}

impl<'a> From<&'a String> for EmojiRef<'a> {
    fn from(raw: &'a String) -> Self {
        Self::parse(raw)
    }
}

impl<'a> From<&'a crate::domain::entities::Emoji> for EmojiRef<'a> {
    fn from(emoji: &'a crate::domain::entities::Emoji) -> Self {
        Self::structured(emoji)
    }
}

// Only the outermost pair; `<a:wave:456>` keeps its animation marker.
fn strip_brackets(raw: &str) -> &str {
    let inner = raw.strip_prefix('<').unwrap_or(raw);
    inner.strip_suffix('>').unwrap_or(inner)
}

/// Normalizes any emoji argument into its API string form.
#[must_use]
pub fn from_emoji<'a>(emoji: impl Into<EmojiRef<'a>>) -> String {
    emoji.into().normalize()
}
