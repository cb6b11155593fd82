use crate::contexts::MakefileContext;
use crate::error::{ConvertError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tinytemplate::TinyTemplate;
use tracing::debug;

pub fn load_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ConvertError::TemplateLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Fill the template slots verbatim; no HTML escaping.
pub fn render(
    template: &str,
    ctx: &MakefileContext,
) -> std::result::Result<String, tinytemplate::error::Error> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("makefile", template)?;
    tt.render("makefile", ctx)
}

/// Create `dir` and write the Makefile into it. An existing `dir` is an
/// error so that a previous run is never clobbered.
pub fn write_makefile(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir(dir).map_err(|source| ConvertError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(file_name);
    File::create_new(&path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .map_err(|source| ConvertError::Io {
            path: path.clone(),
            source,
        })?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(path)
}
