use std::fmt::Write as _;
use std::path::PathBuf;

/// A legacy config found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyConfig {
    /// Directory containing `.claude`.
    pub project_root: PathBuf,
    /// `<project_root>/.claude/hooks/blues-traveler-config.json`
    pub legacy_path: PathBuf,
}

/// What happened to one discovered project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectOutcome {
    /// Already registered; registered data is never overwritten.
    Skipped,
    /// Migrated, or would be in a dry run. `backup` is `None` in a dry run.
    Migrated { backup: Option<PathBuf> },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFailure {
    pub project: String,
    pub message: String,
}

/// Tally of one discovery-and-migrate run. Every list is sorted by project path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationResult {
    pub dry_run: bool,
    pub migrated: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<MigrationFailure>,
    pub backups: Vec<PathBuf>,
}

impl MigrationResult {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    pub fn record(&mut self, project: String, outcome: ProjectOutcome) {
        match outcome {
            ProjectOutcome::Skipped => self.skipped.push(project),
            ProjectOutcome::Migrated { backup } => {
                self.migrated.push(project);
                self.backups.extend(backup);
            }
            ProjectOutcome::Failed { message } => {
                self.errors.push(MigrationFailure { project, message })
            }
        }
    }

    pub fn total_found(&self) -> usize {
        self.migrated.len() + self.skipped.len() + self.errors.len()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Multi-line human-readable report.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let verb = if self.dry_run {
            "Would migrate"
        } else {
            "Migrated"
        };

        let _ = writeln!(out, "Found {} legacy config(s)", self.total_found());
        let _ = writeln!(out, "{}: {}", verb, self.migrated.len());
        for project in &self.migrated {
            let _ = writeln!(out, "  + {}", project);
        }
        let _ = writeln!(out, "Skipped (already registered): {}", self.skipped.len());
        for project in &self.skipped {
            let _ = writeln!(out, "  - {}", project);
        }
        if !self.errors.is_empty() {
            let _ = writeln!(out, "Errors: {}", self.errors.len());
            for failure in &self.errors {
                let _ = writeln!(out, "  ! {}: {}", failure.project, failure.message);
            }
        }
        if !self.backups.is_empty() {
            let _ = writeln!(out, "Backups created: {}", self.backups.len());
        }
        out
    }
}

/// Before/after migration view of a single project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub project: String,
    pub legacy_path: PathBuf,
    pub legacy_exists: bool,
    pub registered: bool,
    /// Location of the registry document, when registered.
    pub xdg_config_file: Option<PathBuf>,
}

impl MigrationStatus {
    pub fn needs_migration(&self) -> bool {
        self.legacy_exists && !self.registered
    }
}
