//! Core domain types
//!
//! These types describe a remote job as the client observes it: the handle the
//! service hands back on submission, the status it reports while the job runs,
//! and the typed payload it produces once the job completes.

pub mod data;
pub mod format;
pub mod job;
pub mod task;
