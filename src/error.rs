use std::{io, path::PathBuf};

use thiserror::Error;

#[cfg(feature = "ftp")]
use suppaftp::FtpError;

#[derive(Error, Debug)]
/// Getter error
pub enum GetterError {
    /// The locator cannot designate a remote resource (for instance it has no host).
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    /// The control connection could not be established.
    #[cfg(feature = "ftp")]
    #[error("Failed to connect to FTP server {address}: {source}")]
    Connection {
        address: String,
        #[source]
        source: FtpError,
    },

    /// The server rejected the login.
    #[cfg(feature = "ftp")]
    #[error("FTP login failed for user {username}: {source}")]
    Authentication {
        username: String,
        #[source]
        source: FtpError,
    },

    /// The listing request failed at the protocol level.
    #[cfg(feature = "ftp")]
    #[error("FTP listing failed for {path}: {source}")]
    Listing {
        path: String,
        #[source]
        source: FtpError,
    },

    /// The download was rejected or interrupted.
    #[cfg(feature = "ftp")]
    #[error("FTP download failed for {path}: {source}")]
    Retrieval {
        path: String,
        #[source]
        source: FtpError,
    },

    /// The destination file could not be created or written.
    #[error("Failed to write {}: {source}", .path.display())]
    LocalWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GetterError {
    /// Returns `true` when the fault lies on the remote side (network, server).
    pub fn is_remote(&self) -> bool {
        !self.is_local()
    }

    /// Returns `true` when the fault lies on the local side (locator, filesystem).
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            GetterError::LocalWrite { .. } | GetterError::InvalidLocator(_)
        )
    }
}
