//! Control-connection seam between the getter and the FTP wire protocol.
//!
//! [`FtpSession`] exposes the handful of commands the getter issues and
//! [`Connector`] opens sessions. The default [`PlainConnector`] is backed by
//! [`suppaftp::FtpStream`]; tests substitute their own implementations.

use std::io::{self, BufRead, BufReader, Cursor, Write};

use log::debug;
use suppaftp::{FtpError, FtpResult, FtpStream, Mode, Status, types::Response};

/// Reply codes accepted for `STAT`: system, directory and file status.
const STAT_REPLY_CODES: [&str; 3] = ["211", "212", "213"];

/// An open FTP control connection.
pub trait FtpSession {
    /// Authenticates the session.
    fn login(&mut self, username: &str, password: &str) -> FtpResult<()>;

    /// Issues `STAT <path>` and returns the entry lines of the reply.
    ///
    /// An empty vector is a successful reply that listed nothing.
    fn stat(&mut self, path: &str) -> FtpResult<Vec<String>>;

    /// Downloads `path` entirely into memory.
    fn retrieve(&mut self, path: &str) -> FtpResult<Vec<u8>>;

    /// Ends the session.
    fn quit(&mut self) -> FtpResult<()>;
}

/// Opens control connections.
pub trait Connector: Send + Sync {
    /// Connects to `address` (`host:port`).
    fn connect(&self, address: &str) -> FtpResult<Box<dyn FtpSession>>;
}

/// Connector speaking plain FTP over TCP.
#[derive(Debug, Clone)]
pub struct PlainConnector {
    /// Whether to use passive mode for data connections (default: true)
    passive_mode: bool,
}

impl PlainConnector {
    pub fn new(passive_mode: bool) -> Self {
        Self { passive_mode }
    }
}

impl Default for PlainConnector {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connector for PlainConnector {
    fn connect(&self, address: &str) -> FtpResult<Box<dyn FtpSession>> {
        let mut ftp_stream = FtpStream::connect(address)?;

        let mode = if self.passive_mode {
            Mode::Passive
        } else {
            Mode::Active
        };
        ftp_stream.set_mode(mode);

        debug!("Connected to FTP server {} ({:?} mode)", address, mode);
        Ok(Box::new(ftp_stream))
    }
}

impl FtpSession for FtpStream {
    fn login(&mut self, username: &str, password: &str) -> FtpResult<()> {
        FtpStream::login(self, username, password)
    }

    // suppaftp keeps only the closing line of multi-line replies, so STAT is
    // exchanged directly on the control socket. Nothing is pending on it
    // between commands.
    fn stat(&mut self, path: &str) -> FtpResult<Vec<String>> {
        let mut control = self.get_ref();
        control
            .write_all(format!("STAT {}\r\n", path).as_bytes())
            .and_then(|_| control.flush())
            .map_err(FtpError::ConnectionError)?;

        read_stat_reply(BufReader::new(control))
    }

    fn retrieve(&mut self, path: &str) -> FtpResult<Vec<u8>> {
        self.retr_as_buffer(path).map(Cursor::into_inner)
    }

    fn quit(&mut self) -> FtpResult<()> {
        FtpStream::quit(self)
    }
}

/// Reads a complete `STAT` reply and returns its entry lines.
///
/// The reply is framed by lines carrying the reply code (`213-Status follows:`
/// ... `213 End of status`). Framing and blank lines are dropped. A reply code
/// other than 211, 212 or 213 is reported as an unexpected response, the way
/// suppaftp reports rejected commands.
pub fn read_stat_reply<R: BufRead>(mut reader: R) -> FtpResult<Vec<String>> {
    let first = read_line(&mut reader)?;
    let code = reply_code(&first)
        .ok_or(FtpError::BadResponse)?
        .to_string();

    if !STAT_REPLY_CODES.contains(&code.as_str()) {
        let status: u32 = code.parse().map_err(|_| FtpError::BadResponse)?;
        return Err(FtpError::UnexpectedResponse(Response::new(
            Status::from(status),
            first.trim_end().as_bytes().to_vec(),
        )));
    }

    let mut entries = Vec::new();
    let mut line = first;
    while !is_final_line(&line, &code) {
        line = read_line(&mut reader)?;
        if reply_code(&line) == Some(code.as_str()) {
            continue;
        }
        let entry = line.trim();
        if !entry.is_empty() {
            entries.push(entry.to_string());
        }
    }

    Ok(entries)
}

fn read_line<R: BufRead>(reader: &mut R) -> FtpResult<String> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(FtpError::ConnectionError)?;
    if read == 0 {
        return Err(FtpError::ConnectionError(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "control connection closed during STAT reply",
        )));
    }
    Ok(line)
}

/// The three-digit code of a framing line (`213-...` or `213 ...`).
fn reply_code(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let framed = bytes.len() >= 4
        && bytes[..3].iter().all(u8::is_ascii_digit)
        && matches!(bytes[3], b' ' | b'-');
    framed.then(|| &line[..3])
}

fn is_final_line(line: &str, code: &str) -> bool {
    reply_code(line) == Some(code) && line.as_bytes()[3] == b' '
}
