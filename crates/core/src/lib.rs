//! Domain logic shared by the folio server and client.
//!
//! Nothing in this crate performs I/O: validation rules, the contact cooldown,
//! project draft normalization, the encoded-array codec and asset naming all
//! live here so the HTTP layer and the client state machines agree on them.

pub mod assets;
pub mod codec;
pub mod contact;
pub mod error;
pub mod project;
pub mod types;
pub mod validation;
