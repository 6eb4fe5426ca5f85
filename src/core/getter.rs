use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::GetterError;

/// What a locator's path designates on the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientMode {
    /// The path does not exist or cannot be accessed.
    Invalid,
    /// The path is a single file.
    File,
    /// The path is a directory.
    Directory,
}

/// A scheme-specific backend able to classify and download remote resources.
///
/// Backends are selected by the surrounding dispatcher using [`Getter::scheme`],
/// typically from a table of `Box<dyn Getter>`. Every call is independent: an
/// implementation must not keep connections or buffers between calls.
pub trait Getter: Send + Sync {
    /// The URL scheme served by this backend.
    fn scheme(&self) -> &'static str;

    /// Content-sniffing hook used by the dispatcher.
    ///
    /// # Returns
    /// - `Ok(Some(url))`: the source was recognised and rewritten to `url`
    /// - `Ok(None)`: the source is not handled by this backend
    fn detect(&self, src: &str, pwd: &str) -> Result<Option<String>, GetterError>;

    /// Classifies what the locator's path designates on the remote system.
    fn classify(&self, url: &Url) -> Result<ClientMode, GetterError>;

    /// Downloads the file designated by `url` into `dst`, overwriting it.
    fn fetch(&self, dst: &Path, url: &Url) -> Result<(), GetterError>;
}
