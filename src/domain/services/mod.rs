mod emoji_normalizer;

pub use emoji_normalizer::{EmojiRef, from_emoji};
