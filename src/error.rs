use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions reported to the user before exiting with status 1.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("project path '{}' does not exist", path.display())]
    ProjectNotFound { path: PathBuf },

    #[error("project path '{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("error writing to {}: {details}", path.display())]
    OutputWrite { path: PathBuf, details: String },

    #[error("invalid exclude pattern '{pattern}': {details}")]
    InvalidPattern { pattern: String, details: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_not_found_display() {
        let err = ReporterError::ProjectNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        assert_eq!(err.to_string(), "project path '/no/such/dir' does not exist");
    }

    #[test]
    fn test_output_write_display() {
        let err = ReporterError::OutputWrite {
            path: PathBuf::from("out.txt"),
            details: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "error writing to out.txt: permission denied");
    }
}
