//! ICP Prospector Library
//!
//! Exposes the input reader, the ICP → Apollo parameter mapper, the search
//! client, and the result presenter for use by the binary and tests.

pub mod apollo;
pub mod config;
pub mod error;
pub mod icp;
pub mod input;
pub mod mapper;
pub mod models;
pub mod output;
