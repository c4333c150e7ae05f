//! AI Studio Core
//!
//! Core types shared by the AI Studio client and CLI.
//!
//! This crate contains:
//! - Domain types: run identifiers, job status, task kinds, output formats, extracted data
//! - DTOs: request bodies and response envelopes exchanged with the AI Studio API

pub mod domain;
pub mod dto;
