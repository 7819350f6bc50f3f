//! Loader for the preprocessed permission data artifacts.
//!
//! The same artifact layout is served two ways: over HTTP ([`HttpSource`])
//! and from a local directory ([`DirSource`]), both behind [`BundleSource`].

mod bundle;
mod dir;
mod error;
mod http;
mod source;

pub use bundle::{dedup_teams, parse_bundle};
pub use dir::DirSource;
pub use error::DataError;
pub use http::HttpSource;
pub use source::BundleSource;
