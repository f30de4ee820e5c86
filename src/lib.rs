//! Client-side core of a form-builder editor.
//!
//! A form is an ordered list of heterogeneous elements — rich-text
//! blocks and question fields — assembled locally and persisted through
//! the form-creator HTTP API. The crate is organized around three ideas:
//!
//! - [`engine`] holds one immutable state value and pure transitions
//!   over it; nothing else in the crate mutates form state.
//! - [`wire`] translates between the internal model and the API's
//!   payload shapes, which differ in field names, polymorphism
//!   encoding, and nullability.
//! - [`registry`] is the closed table of element discriminators both of
//!   them dispatch on.
//!
//! [`transport`] turns engine state into fully described HTTP requests
//! without performing any I/O; sending them is the caller's concern, as
//! is feeding the response back to the engine as an ordinary action.

pub mod cli;
pub mod config;
pub mod endpoints;
pub mod engine;
pub mod model;
pub mod registry;
pub mod transport;
pub mod wire;
