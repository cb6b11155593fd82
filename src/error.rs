//! Error taxonomy for a conversion run and its process exit codes.

use std::path::PathBuf;

/// Exit code of a run that wrote its Makefile.
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_INVALID_COMMANDLINE: u8 = 1;
pub const EXIT_LOAD_TEMPLATE: u8 = 2;
pub const EXIT_NO_PROJECT: u8 = 3;
pub const EXIT_PROJECT_FILE: u8 = 4;
pub const EXIT_IO: u8 = 5;
/// The chip is not covered by the flag table; the utility needs an update.
pub const EXIT_NEED_UPDATE: u8 = 6;

/// Every failure is terminal: it is reported once and ends the run.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("toolchain folder not found: {}", path.display())]
    InvalidUsage { path: PathBuf },

    #[error("unable to read template file: {}. Error: {reason}", path.display())]
    TemplateLoad { path: PathBuf, reason: String },

    #[error(
        "SW4STM32 project not found in {}, use STM32CubeMX to generate a SW4STM32 project first",
        path.display()
    )]
    ProjectNotFound { path: PathBuf },

    #[error("unable to parse project file: {}. Error: {reason}", path.display())]
    ProjectFile { path: PathBuf, reason: String },

    #[error("unknown MCU: {mcu}")]
    UnsupportedChip { mcu: String },

    #[error("invalid chip table: {reason}")]
    ChipTable { reason: String },

    #[error("unable to write {}. Error: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::InvalidUsage { .. } => EXIT_INVALID_COMMANDLINE,
            ConvertError::TemplateLoad { .. } => EXIT_LOAD_TEMPLATE,
            ConvertError::ProjectNotFound { .. } => EXIT_NO_PROJECT,
            ConvertError::ProjectFile { .. } => EXIT_PROJECT_FILE,
            ConvertError::Io { .. } => EXIT_IO,
            ConvertError::UnsupportedChip { .. } | ConvertError::ChipTable { .. } => {
                EXIT_NEED_UPDATE
            }
        }
    }

    pub(crate) fn project_file(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ConvertError::ProjectFile {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_class() {
        let errors = [
            ConvertError::InvalidUsage { path: "p".into() },
            ConvertError::TemplateLoad {
                path: "t".into(),
                reason: "r".into(),
            },
            ConvertError::ProjectNotFound { path: "p".into() },
            ConvertError::project_file("p", "r"),
            ConvertError::Io {
                path: "p".into(),
                source: std::io::Error::other("r"),
            },
            ConvertError::UnsupportedChip { mcu: "X".into() },
        ];
        let mut codes: Vec<u8> = errors.iter().map(ConvertError::exit_code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&EXIT_SUCCESS));
    }

    #[test]
    fn unsupported_chip_names_the_identifier() {
        let err = ConvertError::UnsupportedChip {
            mcu: "GD32F303".into(),
        };
        assert_eq!(err.to_string(), "unknown MCU: GD32F303");
    }
}
