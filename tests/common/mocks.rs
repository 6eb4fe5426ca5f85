//! Mock versions of the FTP control connection and its connector.
use mockall::mock;

use resource_getter::ftp::session::{Connector, FtpSession};
use suppaftp::FtpResult;

mock! {
    pub Session {}
    impl FtpSession for Session {
        fn login(&mut self, username: &str, password: &str) -> FtpResult<()>;
        fn stat(&mut self, path: &str) -> FtpResult<Vec<String>>;
        fn retrieve(&mut self, path: &str) -> FtpResult<Vec<u8>>;
        fn quit(&mut self) -> FtpResult<()>;
    }
}

mock! {
    pub FtpConnector {}
    impl Connector for FtpConnector {
        fn connect(&self, address: &str) -> FtpResult<Box<dyn FtpSession>>;
    }
}
