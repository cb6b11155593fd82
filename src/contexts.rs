use crate::descriptor::{BuildConfiguration, LinkedResources, escape_symbol};
use crate::project::ProjectLocation;
use chrono::Local;
use serde::Serialize;

/// Values for the named slots of the Makefile template. Every slot except
/// `target`, `mcu` and `generated` is a complete `VAR = ...` assignment.
#[derive(Debug, Serialize)]
pub struct MakefileContext {
    pub target: String,
    pub mcu: String,
    pub c_sources: String,
    pub asm_sources: String,
    pub as_includes: String,
    pub as_defs: String,
    pub c_includes: String,
    pub c_defs: String,
    pub ldscript: String,
    pub specs: String,
    pub generated: String,
}

impl MakefileContext {
    pub fn new(
        project: &ProjectLocation,
        mcu_flags: &str,
        resources: &LinkedResources,
        config: &BuildConfiguration,
    ) -> Self {
        let c_defines: Vec<String> = config.c_defines.iter().map(|d| escape_symbol(d)).collect();
        let as_defines: Vec<String> = config.as_defines.iter().map(|d| escape_symbol(d)).collect();
        MakefileContext {
            target: project.name.clone(),
            mcu: mcu_flags.to_string(),
            c_sources: source_list("C_SOURCES", &resources.c_sources),
            asm_sources: source_list("ASM_SOURCES", &resources.asm_sources),
            as_includes: flag_list("AS_INCLUDES", "-I", &config.as_includes),
            as_defs: flag_list("AS_DEFS", "-D", &as_defines),
            c_includes: flag_list("C_INCLUDES", "-I", &config.c_includes),
            c_defs: flag_list("C_DEFS", "-D", &c_defines),
            ldscript: format!("LDSCRIPT = {}", config.ldscript),
            specs: format!("SPECS = {}", config.specs),
            generated: Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// `VAR = \` followed by one path per line.
fn source_list(var: &str, paths: &[String]) -> String {
    format!("{} = \\\n{}", var, paths.join("\\\n"))
}

fn flag_list(var: &str, flag: &str, values: &[String]) -> String {
    let mut line = format!("{} =", var);
    for value in values {
        line.push(' ');
        line.push_str(flag);
        line.push_str(value);
    }
    line
}
