#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 <div align="center">
   <h1>Resource Getter</h1>
   <h3>Fetch a remote artifact by URL and materialize it as a local file</h3>

   ![license](https://shields.io/badge/license-MIT%2FApache--2.0-blue)

  </div>

 # Resource Getter

 A "get a resource from somewhere, by scheme" layer dispatches each URL to a
 backend chosen by its scheme. This crate provides the backend contract and
 the `ftp://` backend.

 ## Core Concepts

- **Getter:** A scheme-specific backend. It can `classify` what a URL designates, `fetch` a file into a local path, and `detect` sources it would rewrite (the FTP backend never does).
- **ClientMode:** The classification of a remote path: `File`, `Directory` or `Invalid`.
- **Credentials:** The username and password resolved from a URL on every call.

 Every call is self-contained: it opens its own connection, owns its own
 buffer, and releases both before returning. A getter can therefore be shared
 between threads without locking.

 ## Features

| **Feature**   | **Description**                                               |
|---------------|---------------------------------------------------------------|
| ftp           | Enables the `ftp://` getter (default)                         |
| full          | Enables all available features                                |

 ## Getting Started

```rust,no_run
use resource_getter::{
    core::getter::{ClientMode, Getter},
    ftp::getter::FtpGetter,
    GetterError,
};
use std::env::temp_dir;
use url::Url;

fn main() -> Result<(), GetterError> {
    let url = Url::parse("ftp://ftp.example.com/pub/README").expect("valid url");
    let getter = FtpGetter::new();

    match getter.classify(&url)? {
        ClientMode::File => getter.fetch(&temp_dir().join("README"), &url)?,
        ClientMode::Directory => println!("{} is a directory", url),
        ClientMode::Invalid => println!("{} does not exist", url),
    }

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.

 */

/// Backend contract shared by every getter
pub mod core;

/// Error types for getters
pub mod error;

#[doc(inline)]
pub use error::*;

/// FTP getter
#[cfg(feature = "ftp")]
#[cfg_attr(docsrs, doc(cfg(feature = "ftp")))]
pub mod ftp;
