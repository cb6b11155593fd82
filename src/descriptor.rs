//! Extraction of sources, compiler and linker settings from the SW4STM32
//! `.project` and `.cproject` descriptors.

use crate::error::{ConvertError, Result};
use crate::xml::{self, Element, Step};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

const COMPILER_TOOL: &str = "MCU GCC Compiler";
const LINKER_TOOL: &str = "MCU GCC Linker";
const LINKER_SCRIPT_OPTION: &str = "fr.ac6.managedbuild.tool.gnu.cross.c.linker.script";
const LINKER_FLAGS_OPTION: &str = "gnu.c.link.option.ldflags";

/// Deeper markers are left verbatim.
const MAX_PARENT_LEVELS: usize = 255;

static PARENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PARENT-(\d+)-PROJECT_LOC/?").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("build configuration {0:?} not found")]
    MissingConfiguration(String),
    #[error("unable to find target MCU node")]
    MissingMcu,
    #[error("unable to find link script")]
    MissingLinkScript,
    #[error("unable to find link specs")]
    MissingSpecs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    CSource,
    AsmSource,
}

/// Rewrite an Eclipse `PARENT-<N>-PROJECT_LOC` location into `N + 1` parent
/// steps. The Makefile lives one folder below the project, hence the extra
/// step. Paths without the marker are returned unchanged.
pub fn normalize_path(path: &str) -> String {
    let Some(caps) = PARENT_MARKER.captures(path) else {
        return path.to_string();
    };
    let marker = caps.get(0).map_or(0..0, |m| m.range());
    if marker.end == path.len() {
        return path.to_string();
    }
    let steps = caps[1]
        .parse::<usize>()
        .ok()
        .and_then(|levels| levels.checked_add(1))
        .filter(|&steps| steps <= MAX_PARENT_LEVELS + 1);
    let Some(steps) = steps else {
        return path.to_string();
    };
    format!(
        "{}{}{}",
        &path[..marker.start],
        "../".repeat(steps),
        &path[marker.end..]
    )
}

/// Case-sensitive: `.C` and `.S` are not picked up.
pub fn classify(path: &str) -> Option<ResourceKind> {
    if path.ends_with(".c") {
        Some(ResourceKind::CSource)
    } else if path.ends_with(".s") {
        Some(ResourceKind::AsmSource)
    } else {
        None
    }
}

/// Backslash-escape parentheses so the shell passes them through to the compiler.
pub fn escape_symbol(symbol: &str) -> String {
    symbol.replace('(', "\\(").replace(')', "\\)")
}

fn read_descriptor(path: &Path) -> Result<Element> {
    let text = fs::read_to_string(path).map_err(|e| ConvertError::project_file(path, e))?;
    xml::parse(&text).map_err(|e| ConvertError::project_file(path, e))
}

/// Sources linked into the project, in document order, duplicates kept.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LinkedResources {
    pub c_sources: Vec<String>,
    pub asm_sources: Vec<String>,
}

impl LinkedResources {
    pub fn read(path: &Path) -> Result<Self> {
        let root = read_descriptor(path)?;
        let resources = Self::from_element(&root);
        debug!(
            "{} C sources, {} ASM sources in {}",
            resources.c_sources.len(),
            resources.asm_sources.len(),
            path.display()
        );
        Ok(resources)
    }

    pub fn from_element(root: &Element) -> Self {
        let mut resources = LinkedResources::default();
        let locations = root.find_all(&[
            Step::tag("linkedResources"),
            Step::tag("link"),
            Step::tag("location"),
        ]);
        for location in locations {
            let path = normalize_path(location.text().trim());
            match classify(&path) {
                Some(ResourceKind::CSource) => resources.c_sources.push(path),
                Some(ResourceKind::AsmSource) => resources.asm_sources.push(path),
                None => {}
            }
        }
        resources
    }
}

/// Settings of one named build configuration in `.cproject`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub mcu: String,
    pub c_includes: Vec<String>,
    /// Raw symbols as entered in the IDE, unescaped.
    pub c_defines: Vec<String>,
    /// Never populated by the descriptor; kept so the Makefile still
    /// carries the assembler variables.
    pub as_includes: Vec<String>,
    pub as_defines: Vec<String>,
    pub ldscript: String,
    pub specs: String,
}

impl BuildConfiguration {
    pub fn read(path: &Path, configuration: &str) -> Result<Self> {
        let root = read_descriptor(path)?;
        let config = Self::from_element(&root, configuration)
            .map_err(|e| ConvertError::project_file(path, e))?;
        debug!("MCU: {}", config.mcu);
        debug!("C includes: {:?}", config.c_includes);
        debug!("C defines: {:?}", config.c_defines);
        debug!("LD script: {}", config.ldscript);
        Ok(config)
    }

    pub fn from_element(
        root: &Element,
        configuration: &str,
    ) -> std::result::Result<Self, DescriptorError> {
        let conf = root
            .find(&[Step::with("configuration", "name", configuration)])
            .ok_or_else(|| DescriptorError::MissingConfiguration(configuration.to_string()))?;

        let mcu = conf
            .find(&[Step::with("option", "name", "Mcu")])
            .and_then(|node| node.attr("value"))
            .ok_or(DescriptorError::MissingMcu)?
            .to_string();

        let compiler_values = |value_type: &str| -> Vec<String> {
            conf.find_all(&[
                Step::with("tool", "name", COMPILER_TOOL),
                Step::with("option", "valueType", value_type),
                Step::tag("listOptionValue"),
            ])
            .into_iter()
            .filter_map(|node| node.attr("value"))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
        };
        let c_includes = compiler_values("includePath");
        let c_defines = compiler_values("definedSymbols");

        let linker_option = |super_class: &str| -> Option<String> {
            conf.find(&[
                Step::with("tool", "name", LINKER_TOOL),
                Step::with("option", "superClass", super_class),
            ])
            .and_then(|node| node.attr("value"))
            .map(str::to_string)
        };
        let ldscript =
            linker_option(LINKER_SCRIPT_OPTION).ok_or(DescriptorError::MissingLinkScript)?;
        let specs = linker_option(LINKER_FLAGS_OPTION).ok_or(DescriptorError::MissingSpecs)?;

        Ok(BuildConfiguration {
            mcu,
            c_includes,
            c_defines,
            as_includes: Vec::new(),
            as_defines: Vec::new(),
            ldscript,
            specs,
        })
    }
}
