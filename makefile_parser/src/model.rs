/// Variables of a generated Makefile, in the order they were written.
#[derive(Debug, Default)]
pub struct MakefileConfig {
    pub target: Option<String>,
    pub mcu: Option<String>,
    pub c_sources: Vec<String>,
    pub asm_sources: Vec<String>,
    pub c_includes: Vec<String>,
    pub as_includes: Vec<String>,
    /// Symbols without the `-D`, shell escapes kept.
    pub c_defs: Vec<String>,
    pub as_defs: Vec<String>,
    pub ldscript: Option<String>,
    pub specs: Option<String>,
}
