#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for hashscan
//!
//! This crate owns the HTTP transport (authentication header, connection
//! pool sizing, timeouts) and exposes the provider lookup as the
//! [`LookupClient`] capability the analyzer consumes.

mod client;
mod lookup;

pub use client::{NetClient, NetConfig};
pub use lookup::{LookupClient, LookupResponse, VirusTotalClient};
