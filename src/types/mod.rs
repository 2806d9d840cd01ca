//! Types used throughout the COS integration.
//!
//! `common` holds enums and small shared structs, `config` the bucket
//! sub-resource documents (CORS, versioning, replication, inventory, logging,
//! lifecycle), and `requests`/`responses` the per-operation shapes.

mod common;
mod config;
mod requests;
mod responses;

pub use common::*;
pub use config::*;
pub use requests::*;
pub use responses::*;
