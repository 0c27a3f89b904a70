//! # clip-storage
//!
//! HTTP object storage client implementing the `ObjectStorage` trait from
//! `clip-core`. Talks to an S3-style storage service over its REST API and
//! hands back public URLs for uploaded media.

mod client;

pub use client::HttpObjectStorage;
