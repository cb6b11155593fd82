use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Environment variable that points the tool at a different Makefile template.
pub const TEMPLATE_ENV: &str = "CUBEMX2MAKEFILE_TEMPLATE";
pub const TEMPLATE_FILE_NAME: &str = "CubeMX2Makefile.tpl";

#[derive(Debug, Deserialize)]
pub struct ChipFamily {
    pub pattern: String,
    pub flags: String,
}

/// Ordered chip families; the first matching pattern wins.
#[derive(Debug, Deserialize)]
pub struct ChipTable {
    pub family: Vec<ChipFamily>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub template_path: PathBuf,
    /// Build configuration every compiler/linker lookup is scoped under.
    pub configuration: String,
    pub output_dir_name: String,
    pub makefile_name: String,
}

impl Settings {
    pub fn with_template(template_path: impl Into<PathBuf>) -> Self {
        Settings {
            template_path: template_path.into(),
            configuration: "Debug".to_string(),
            output_dir_name: "cubemx2makefile_generated".to_string(),
            makefile_name: "Makefile".to_string(),
        }
    }

    /// Template from `CUBEMX2MAKEFILE_TEMPLATE`, else next to the executable.
    pub fn from_env() -> Self {
        let template_path = match env::var_os(TEMPLATE_ENV) {
            Some(path) => PathBuf::from(path),
            None => env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|dir| dir.join(TEMPLATE_FILE_NAME)))
                .unwrap_or_else(|| PathBuf::from(TEMPLATE_FILE_NAME)),
        };
        Settings::with_template(template_path)
    }
}
