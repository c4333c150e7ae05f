//! Data Transfer Objects for the AI Studio API
//!
//! Request bodies the client submits and the response envelopes the service
//! returns. Field names follow the wire format; the public request structs
//! rename a few fields to friendlier Rust names.

pub mod browser_agent;
pub mod crawl;
pub mod map;
pub mod run;
pub mod schema;
pub mod scrape;
pub mod search;
