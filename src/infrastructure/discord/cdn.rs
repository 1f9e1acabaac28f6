//! Discord CDN URL construction.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use super::error::{CdnError, CdnResult};

/// Public CDN host for avatars, icons, banners and emoji.
pub const CDN_BASE_URL: &str = "https://cdn.discordapp.com";

/// Image format requested when none is given.
pub const DEFAULT_EXTENSION: &str = "webp";

/// Image size requested when none is given.
pub const DEFAULT_SIZE: u32 = 1024;

/// Smallest size the CDN serves.
pub const MIN_SIZE: u32 = 16;

/// Largest size the CDN serves.
pub const MAX_SIZE: u32 = 4096;

const HASH_PLACEHOLDER: &str = "hash";

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid")
});

/// Builder for CDN image URLs.
///
/// The route is a path template such as `icons/{guild_id}` or
/// `icons/{guild_id}/{hash}`. Placeholders are filled from the snowflake IDs
/// added with [`CdnUrl::id`]; `{hash}` is filled with the image hash. When the
/// route has no `{hash}` placeholder the hash becomes the last path segment.
///
/// ```
/// use dico::infrastructure::discord::CdnUrl;
///
/// let url = CdnUrl::new("icons/{guild_id}", "a_1f2e")
///     .id("guild_id", 41_771_983_423_143_937)
///     .size(256)
///     .build()
///     .unwrap();
/// assert_eq!(url, "https://cdn.discordapp.com/icons/41771983423143937/a_1f2e.webp?size=256");
/// ```
#[derive(Debug, Clone)]
pub struct CdnUrl {
    base_url: String,
    route: String,
    image_hash: String,
    extension: String,
    size: u32,
    ids: Vec<(String, u64)>,
}

impl CdnUrl {
    #[must_use]
    pub fn new(route: impl Into<String>, image_hash: impl Into<String>) -> Self {
        Self {
            base_url: CDN_BASE_URL.to_string(),
            route: route.into(),
            image_hash: image_hash.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            size: DEFAULT_SIZE,
            ids: Vec::new(),
        }
    }

    /// Overrides the CDN host, e.g. for a media proxy.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Supplies a value for the `{name}` route placeholder.
    #[must_use]
    pub fn id(mut self, name: impl Into<String>, value: u64) -> Self {
        self.ids.push((name.into(), value));
        self
    }

    #[must_use]
    pub fn ids<I, K>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        self.ids
            .extend(ids.into_iter().map(|(name, value)| (name.into(), value)));
        self
    }

    fn lookup(&self, name: &str) -> Option<u64> {
        self.ids
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }

    /// Renders the URL.
    ///
    /// # Errors
    ///
    /// Returns `CdnError::InvalidSize` if the size is outside `16..=4096`, or
    /// `CdnError::MissingPlaceholder` if the route names an ID that was not supplied.
    pub fn build(&self) -> CdnResult<String> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(CdnError::InvalidSize {
                size: self.size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }

        let mut hash_used = false;
        let mut missing: Option<String> = None;
        let route = PLACEHOLDER_RE.replace_all(&self.route, |caps: &Captures<'_>| {
            let name = &caps[1];
            if name == HASH_PLACEHOLDER {
                hash_used = true;
                return self.image_hash.clone();
            }
            self.lookup(name).map_or_else(
                || {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                },
                |value| value.to_string(),
            )
        });

        if let Some(name) = missing {
            return Err(CdnError::missing_placeholder(name));
        }

        let base = self.base_url.trim_end_matches('/');
        let route = route.trim_matches('/');
        let url = if hash_used {
            format!("{base}/{route}.{}?size={}", self.extension, self.size)
        } else {
            format!(
                "{base}/{route}/{}.{}?size={}",
                self.image_hash, self.extension, self.size
            )
        };

        trace!(url = %url, "Built CDN URL");
        Ok(url)
    }
}

/// Builds a CDN URL with the default extension and size.
///
/// # Errors
///
/// Returns `CdnError::MissingPlaceholder` if the route names an ID not present in `ids`.
pub fn cdn_url(route: &str, image_hash: &str, ids: &[(&str, u64)]) -> CdnResult<String> {
    CdnUrl::new(route, image_hash)
        .ids(ids.iter().copied())
        .build()
}
