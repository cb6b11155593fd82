//! Convert an STM32CubeMX-generated SW4STM32 project into a standalone
//! GNU Arm Makefile.

pub mod chips;
pub mod config;
pub mod contexts;
pub mod descriptor;
pub mod error;
pub mod project;
pub mod render;
pub mod xml;

use crate::chips::ChipResolver;
use crate::config::Settings;
use crate::contexts::MakefileContext;
use crate::descriptor::{BuildConfiguration, LinkedResources};
use crate::error::{ConvertError, Result};
use crate::project::ProjectLocation;
use std::path::{Path, PathBuf};

/// Run the whole conversion for one project folder and return the path of
/// the written Makefile. Nothing is written unless every step succeeds.
pub fn run(project_dir: &Path, settings: &Settings) -> Result<PathBuf> {
    let project = ProjectLocation::resolve(project_dir)?;
    let template = render::load_template(&settings.template_path)?;

    let resources = LinkedResources::read(&project.project_file())?;
    let config = BuildConfiguration::read(&project.cproject_file(), &settings.configuration)?;

    let resolver = ChipResolver::builtin()?;
    let mcu_flags = resolver.resolve(&config.mcu)?;

    let ctx = MakefileContext::new(&project, mcu_flags, &resources, &config);
    let makefile = render::render(&template, &ctx).map_err(|e| ConvertError::TemplateLoad {
        path: settings.template_path.clone(),
        reason: e.to_string(),
    })?;

    render::write_makefile(
        &project.root.join(&settings.output_dir_name),
        &settings.makefile_name,
        &makefile,
    )
}
