//! Progress reporting hooks for long-running migration runs.

use std::path::PathBuf;

use super::types::{MigrationResult, ProjectOutcome};

/// Receives progress notifications. Every method defaults to doing nothing.
pub trait ProgressReporter {
    fn discovery_started(&self, _roots: &[PathBuf]) {}

    fn discovery_finished(&self, _found: usize) {}

    /// `index` is zero-based.
    fn project_started(&self, _index: usize, _total: usize, _project: &str) {}

    fn project_finished(&self, _project: &str, _outcome: &ProjectOutcome) {}

    fn finished(&self, _result: &MigrationResult) {}
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {}
