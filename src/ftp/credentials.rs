use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

const ANONYMOUS: &str = "anonymous";

/// Username and password used to log in to an FTP server.
///
/// Resolved from the locator on every call and never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Resolves the credentials carried by `url`.
    ///
    /// Each field is taken from the URL user-info first, then from the `user` /
    /// `password` query parameters, and falls back to `anonymous`. Username and
    /// password resolve independently of each other.
    pub fn from_url(url: &Url) -> Self {
        let mut username = decode(url.username());
        let mut password = url.password().map(decode).unwrap_or_default();

        if username.is_empty() {
            username = query_param(url, "user");
        }
        if password.is_empty() {
            password = query_param(url, "password");
        }

        if username.is_empty() {
            username = ANONYMOUS.to_string();
        }
        if password.is_empty() {
            password = ANONYMOUS.to_string();
        }

        Self { username, password }
    }

    pub fn is_anonymous(&self) -> bool {
        self.username == ANONYMOUS
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// First value of the query parameter `name`, or an empty string.
fn query_param(url: &Url, name: &str) -> String {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}
