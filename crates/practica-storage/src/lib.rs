//! practica-storage
//!
//! The roster repository seam and its backends: in-memory, a single JSON file
//! on local disk, and S3 objects via the AWS SDK.

pub mod any;
pub mod client;
pub mod error;
pub mod file;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod snapshot;
pub mod state;
pub mod store;
