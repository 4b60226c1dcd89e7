//! Media URL resolution for location images.
#![forbid(unsafe_code)]

use log::warn;
use url::Url;

/// Where location images are served from.
///
/// Stored image paths are relative to the media root (for example
/// `pics/jaflong.jpg`); views expose them as absolute URLs under
/// [`MediaConfig::base_url`].
///
/// # Examples
/// ```
/// use bonvoyage_suggest::MediaConfig;
///
/// let media = MediaConfig::parse("https://bonvoyage.example/media")?;
/// assert_eq!(
///     media.resolve("pics/jaflong.jpg").as_deref(),
///     Some("https://bonvoyage.example/media/pics/jaflong.jpg"),
/// );
/// # Ok::<(), url::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    base_url: Url,
}

impl MediaConfig {
    /// Serve media from `base_url`.
    ///
    /// A trailing slash is added when missing so relative paths nest under
    /// the base path instead of replacing its last segment.
    #[must_use]
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url }
    }

    /// Parse `raw` as the media base URL.
    ///
    /// # Errors
    /// Returns [`url::ParseError`] when `raw` is not an absolute URL.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw).map(Self::new)
    }

    /// Media root.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a stored image path.
    ///
    /// Paths that are already absolute URLs are returned unchanged. Blank
    /// paths resolve to `None`.
    #[must_use]
    pub fn resolve(&self, image: &str) -> Option<String> {
        let image = image.trim();
        if image.is_empty() {
            return None;
        }
        if let Ok(absolute) = Url::parse(image) {
            return Some(absolute.into());
        }
        match self.base_url.join(image.trim_start_matches('/')) {
            Ok(url) => Some(url.into()),
            Err(err) => {
                warn!("dropping unresolvable image path {image}: {err}");
                None
            }
        }
    }
}
