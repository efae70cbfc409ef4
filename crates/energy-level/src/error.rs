use std::path::PathBuf;

use energy_core::CoreError;

/// Errors that can occur while reading, writing or configuring levels.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// The level file is absent or could not be read.
    #[error("level file not found: {path}")]
    NotFound { path: PathBuf },

    /// The level text could not be parsed. `line` is 1-based.
    #[error("malformed level file at line {line}: {detail}")]
    Malformed { line: usize, detail: String },

    /// A configuration file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A configuration file failed to deserialize.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A decoded circuit violated a core invariant.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An I/O error occurred while writing.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LevelError {
    pub(crate) fn malformed(line: usize, detail: impl Into<String>) -> Self {
        LevelError::Malformed {
            line,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let e = LevelError::NotFound {
            path: PathBuf::from("/tmp/level3.nrg"),
        };
        assert!(e.to_string().contains("level3.nrg"));

        let e = LevelError::malformed(4, "bad edge index 'x'");
        assert_eq!(
            e.to_string(),
            "malformed level file at line 4: bad edge index 'x'"
        );
    }

    #[test]
    fn core_errors_convert() {
        let e: LevelError = CoreError::UnknownMarker("Q".into()).into();
        assert!(matches!(e, LevelError::Core(CoreError::UnknownMarker(_))));
    }
}
