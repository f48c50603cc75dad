// Source file discovery
pub mod discovery;

// Agents, tasks and the sequential executor
pub mod crew;

// Tools agents can call
pub mod tools;

// Code analysis workflow and crew definitions
pub mod analysis;

// Report artifacts
pub mod report;

// Configuration and CLI
pub mod cli;
pub mod config;

pub mod error;
pub mod extract;

pub use error::{PipelineError, Result};
