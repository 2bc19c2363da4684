//! Client side of the folio site.
//!
//! - [`api::FolioClient`] -- typed HTTP client for the folio API.
//! - [`contact::ContactForm`] -- the public contact form state machine.
//! - [`dashboard::Dashboard`] -- the admin project dashboard state machine.
//!
//! The state machines talk to the server through the [`contact::ContactRelay`]
//! and [`dashboard::ProjectApi`] traits, both implemented by `FolioClient`.

pub mod api;
pub mod contact;
pub mod dashboard;
pub mod error;

pub use api::FolioClient;
pub use error::ClientError;
