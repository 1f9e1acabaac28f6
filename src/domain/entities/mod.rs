//! Domain entity definitions.

mod emoji;

pub use emoji::{Emoji, EmojiId, NamedEmoji};
