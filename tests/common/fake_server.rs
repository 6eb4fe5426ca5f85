//! In-memory FTP server used to exercise getters without a network.
use std::{
    collections::BTreeMap,
    io,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use resource_getter::ftp::session::{Connector, FtpSession};
use suppaftp::{FtpError, FtpResult};

#[derive(Default)]
struct State {
    files: BTreeMap<String, Vec<u8>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// A server holding files keyed by absolute path. Directories are implied by
/// the file paths below them.
#[derive(Clone, Default)]
pub struct FakeServer {
    state: Arc<State>,
}

impl FakeServer {
    pub fn with_files(files: &[(&str, &[u8])]) -> Self {
        let files = files
            .iter()
            .map(|(path, content)| (path.to_string(), content.to_vec()))
            .collect();

        Self {
            state: Arc::new(State {
                files,
                ..State::default()
            }),
        }
    }

    pub fn opened(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }
}

impl Connector for FakeServer {
    fn connect(&self, _address: &str) -> FtpResult<Box<dyn FtpSession>> {
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            state: Arc::clone(&self.state),
        }))
    }
}

struct FakeSession {
    state: Arc<State>,
}

impl FtpSession for FakeSession {
    fn login(&mut self, _username: &str, _password: &str) -> FtpResult<()> {
        Ok(())
    }

    fn stat(&mut self, path: &str) -> FtpResult<Vec<String>> {
        if let Some(content) = self.state.files.get(path) {
            return Ok(vec![format!(
                "-rw-r--r--    1 1000     1000     {:>8} Oct 19 10:00 {}",
                content.len(),
                path.rsplit('/').next().unwrap_or(path)
            )]);
        }

        let prefix = format!("{}/", path.trim_end_matches('/'));
        let children: Vec<String> = self
            .state
            .files
            .keys()
            .filter_map(|file| file.strip_prefix(&prefix))
            .map(|rest| rest.split('/').next().unwrap_or(rest).to_string())
            .collect();

        if children.is_empty() {
            return Ok(Vec::new());
        }

        let mut entries = vec![".".to_string(), "..".to_string()];
        entries.extend(children);
        entries.dedup();
        Ok(entries)
    }

    fn retrieve(&mut self, path: &str) -> FtpResult<Vec<u8>> {
        self.state.files.get(path).cloned().ok_or_else(|| {
            FtpError::ConnectionError(io::Error::new(
                io::ErrorKind::NotFound,
                format!("550 {}: No such file or directory", path),
            ))
        })
    }

    fn quit(&mut self) -> FtpResult<()> {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
