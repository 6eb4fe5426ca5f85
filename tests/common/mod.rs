#![allow(dead_code)]

mod fake_server;
mod mocks;

pub use fake_server::FakeServer;
pub use mocks::{MockFtpConnector, MockSession};
