use std::path::Path;

use super::ConfigFormat;
use crate::errors::TravelerError;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Unsupported config format '{format}'")]
    UnsupportedFormat { format: String },

    #[error("Failed to parse {format}: {message}")]
    Parse {
        format: ConfigFormat,
        message: String,
    },

    #[error("Failed to parse {format} file '{path}': {message}")]
    ParseFile {
        path: String,
        format: ConfigFormat,
        message: String,
    },

    #[error("Expected a mapping at the top level of {format} document, found {found}")]
    NotAMapping {
        format: ConfigFormat,
        found: &'static str,
    },

    #[error("Failed to serialize {format}: {message}")]
    Serialize {
        format: ConfigFormat,
        message: String,
    },

    #[error("Document does not match the expected shape: {message}")]
    Shape { message: String },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Attach a file path to a parse error produced from in-memory content.
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            CodecError::Parse { format, message } => CodecError::ParseFile {
                path: path.display().to_string(),
                format,
                message,
            },
            CodecError::NotAMapping { format, found } => CodecError::ParseFile {
                path: path.display().to_string(),
                format,
                message: format!("expected a mapping at the top level, found {found}"),
            },
            other => other,
        }
    }
}

impl TravelerError for CodecError {
    fn error_code(&self) -> &'static str {
        match self {
            CodecError::UnsupportedFormat { .. } => "CODEC_UNSUPPORTED_FORMAT",
            CodecError::Parse { .. } | CodecError::ParseFile { .. } => "CODEC_PARSE_FAILED",
            CodecError::NotAMapping { .. } => "CODEC_NOT_A_MAPPING",
            CodecError::Serialize { .. } => "CODEC_SERIALIZE_FAILED",
            CodecError::Shape { .. } => "CODEC_SHAPE_MISMATCH",
            CodecError::Read { .. } => "CODEC_READ_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(
            self,
            CodecError::Serialize { .. } | CodecError::Read { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_path_converts_parse_error() {
        let err = CodecError::Parse {
            format: ConfigFormat::Yaml,
            message: "bad indent".to_string(),
        }
        .with_path(Path::new("/p/.claude/hooks.yml"));

        assert_eq!(
            err.to_string(),
            "Failed to parse yaml file '/p/.claude/hooks.yml': bad indent"
        );
        assert_eq!(err.error_code(), "CODEC_PARSE_FAILED");
        assert!(err.is_user_error());
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = CodecError::UnsupportedFormat {
            format: "ini".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported config format 'ini'");
        assert_eq!(err.error_code(), "CODEC_UNSUPPORTED_FORMAT");
    }
}
