use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Where the loader looks for app config documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Registry when the project is registered, otherwise the legacy file.
    #[default]
    XdgFirst,
    /// Registry only.
    XdgOnly,
    /// Legacy in-project files only.
    LegacyOnly,
}

impl LoadStrategy {
    pub const ALL: [LoadStrategy; 3] = [
        LoadStrategy::XdgFirst,
        LoadStrategy::XdgOnly,
        LoadStrategy::LegacyOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStrategy::XdgFirst => "xdg",
            LoadStrategy::XdgOnly => "xdg-only",
            LoadStrategy::LegacyOnly => "legacy",
        }
    }

    pub fn reads_registry(&self) -> bool {
        !matches!(self, LoadStrategy::LegacyOnly)
    }

    pub fn reads_legacy(&self) -> bool {
        !matches!(self, LoadStrategy::XdgOnly)
    }
}

impl fmt::Display for LoadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xdg" | "xdg-first" => Ok(LoadStrategy::XdgFirst),
            "xdg-only" => Ok(LoadStrategy::XdgOnly),
            "legacy" | "legacy-only" => Ok(LoadStrategy::LegacyOnly),
            other => Err(ConfigError::InvalidShape {
                message: format!(
                    "unknown load strategy '{}' (expected xdg, xdg-only or legacy)",
                    other
                ),
            }),
        }
    }
}
