use std::{fs::File, io, io::Write, path::Path};

use log::{debug, info};
use percent_encoding::percent_decode_str;
use url::Url;

use crate::{
    core::getter::{ClientMode, Getter},
    error::GetterError,
};

use super::{
    FTP_SCHEME,
    credentials::Credentials,
    session::{Connector, FtpSession, PlainConnector},
};

/// Port used when the locator does not specify one.
pub const DEFAULT_PORT: u16 = 21;

/// Getter for `ftp://` locators.
///
/// Every operation opens its own control connection, logs in, runs a single
/// command and quits, so one `FtpGetter` can serve concurrent calls.
pub struct FtpGetter {
    connector: Box<dyn Connector>,
}

impl FtpGetter {
    /// Creates a getter that speaks plain FTP in passive mode.
    pub fn new() -> Self {
        FtpGetterBuilder::new().build()
    }

    /// Opens an authenticated control connection to the locator's server.
    ///
    /// The returned [`Connection`] quits the session when dropped, including
    /// when login fails.
    pub fn connect(&self, url: &Url) -> Result<Connection, GetterError> {
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| GetterError::InvalidLocator(format!("{} has no host", url)))?;
        let address = format!("{}:{}", host, url.port().unwrap_or(DEFAULT_PORT));

        let session = self
            .connector
            .connect(&address)
            .map_err(|source| GetterError::Connection {
                address: address.clone(),
                source,
            })?;
        let mut connection = Connection { session };

        let credentials = Credentials::from_url(url);
        connection
            .session
            .login(&credentials.username, &credentials.password)
            .map_err(|source| GetterError::Authentication {
                username: credentials.username.clone(),
                source,
            })?;

        if credentials.is_anonymous() {
            debug!("Logged in to {} anonymously", address);
        } else {
            debug!("Logged in to {} as {}", address, credentials.username);
        }
        Ok(connection)
    }
}

impl Default for FtpGetter {
    fn default() -> Self {
        Self::new()
    }
}

impl Getter for FtpGetter {
    fn scheme(&self) -> &'static str {
        FTP_SCHEME
    }

    /// FTP resources are recognised by scheme alone; nothing is ever sniffed.
    fn detect(&self, _src: &str, _pwd: &str) -> Result<Option<String>, GetterError> {
        Ok(None)
    }

    fn classify(&self, url: &Url) -> Result<ClientMode, GetterError> {
        let path = remote_path(url)?;
        let mut connection = self.connect(url)?;

        let entries = connection
            .session()
            .stat(&path)
            .map_err(|source| GetterError::Listing {
                path: path.clone(),
                source,
            })?;

        // A file lists as itself; a directory lists at least "." and "..".
        let mode = match entries.len() {
            0 => ClientMode::Invalid,
            1 => ClientMode::File,
            _ => ClientMode::Directory,
        };

        debug!("STAT {} returned {} entries: {:?}", path, entries.len(), mode);
        Ok(mode)
    }

    fn fetch(&self, dst: &Path, url: &Url) -> Result<(), GetterError> {
        let path = remote_path(url)?;
        let mut connection = self.connect(url)?;

        info!("FTP downloading remote {} to local {}", path, dst.display());

        let buffer = connection
            .session()
            .retrieve(&path)
            .map_err(|source| GetterError::Retrieval {
                path: path.clone(),
                source,
            })?;
        drop(connection);

        info!("FTP download total size: {} bytes", buffer.len());

        write_file(dst, &buffer)
    }
}

/// An authenticated control connection, closed on drop.
pub struct Connection {
    session: Box<dyn FtpSession>,
}

impl Connection {
    pub fn session(&mut self) -> &mut dyn FtpSession {
        self.session.as_mut()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // The reply to QUIT carries nothing the caller can act on.
        let _ = self.session.quit();
    }
}

/// The decoded remote path of the locator.
///
/// The path is sent verbatim on the control channel, so a decoded line break
/// would start a new FTP command.
fn remote_path(url: &Url) -> Result<String, GetterError> {
    let path = percent_decode_str(url.path()).decode_utf8_lossy().into_owned();
    if path.contains(['\r', '\n']) {
        return Err(GetterError::InvalidLocator(format!(
            "{} has a line break in its path",
            url
        )));
    }
    Ok(path)
}

fn write_file(dst: &Path, content: &[u8]) -> Result<(), GetterError> {
    let local_write = |source: io::Error| GetterError::LocalWrite {
        path: dst.to_path_buf(),
        source,
    };

    let mut file = File::create(dst).map_err(local_write)?;
    file.write_all(content).map_err(local_write)?;
    file.flush().map_err(local_write)
}

/// Builder for [`FtpGetter`].
///
/// # Examples
///
/// ```
/// use resource_getter::ftp::getter::FtpGetterBuilder;
///
/// let getter = FtpGetterBuilder::new().passive_mode(false).build();
/// ```
pub struct FtpGetterBuilder {
    passive_mode: bool,
    connector: Option<Box<dyn Connector>>,
}

impl Default for FtpGetterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FtpGetterBuilder {
    /// Creates a new builder with passive mode enabled.
    pub fn new() -> Self {
        Self {
            passive_mode: true,
            connector: None,
        }
    }

    /// Sets whether data connections use passive mode.
    ///
    /// Ignored when a custom connector is supplied.
    pub fn passive_mode(mut self, passive: bool) -> Self {
        self.passive_mode = passive;
        self
    }

    /// Replaces the transport used to open control connections.
    pub fn connector<C: Connector + 'static>(mut self, connector: C) -> Self {
        self.connector = Some(Box::new(connector));
        self
    }

    /// Builds the FtpGetter instance.
    pub fn build(self) -> FtpGetter {
        let connector = self
            .connector
            .unwrap_or_else(|| Box::new(PlainConnector::new(self.passive_mode)));

        FtpGetter { connector }
    }
}
