//! Terminal output
//!
//! Coloured summary header on stdout followed by pretty JSON of the payload.

use aistudio_client::{JobResult, RunId};
use anyhow::Result;
use colored::*;
use serde::Serialize;
use serde_json::Value;

/// Print a finished job
pub fn print_job<T: Serialize>(label: &str, job: &JobResult<T>) -> Result<()> {
    print_header(label, &job.run_id, job.message.as_deref());
    print_json(&job.data)
}

pub fn print_header(label: &str, run_id: &RunId, message: Option<&str>) {
    println!("{} {}", "✓".green(), format!("{} completed", label).bold());
    println!("  Run ID:  {}", run_id.as_str().cyan());
    if let Some(message) = message {
        println!("  Message: {}", message.dimmed());
    }
    println!("{}", "─".repeat(80).dimmed());
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a generated schema, or a notice when none could be derived
pub fn print_schema(schema: Option<&Value>) -> Result<()> {
    match schema {
        Some(schema) => print_json(schema),
        None => {
            println!("{}", "No schema could be generated for this prompt.".yellow());
            Ok(())
        }
    }
}

/// Human-readable count line for list payloads
pub fn count_line(count: usize, noun: &str) -> ColoredString {
    let plural = if count == 1 { "" } else { "s" };
    format!("Found {} {}{}", count, noun, plural).bold()
}
