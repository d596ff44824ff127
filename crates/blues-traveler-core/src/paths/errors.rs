use crate::errors::TravelerError;

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    #[error("Could not determine current working directory: {source}")]
    CurrentDirUnavailable {
        #[source]
        source: std::io::Error,
    },
}

impl TravelerError for PathError {
    fn error_code(&self) -> &'static str {
        match self {
            PathError::HomeDirNotFound => "PATH_HOME_DIR_NOT_FOUND",
            PathError::CurrentDirUnavailable { .. } => "PATH_CURRENT_DIR_UNAVAILABLE",
        }
    }
}
