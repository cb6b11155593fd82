mod model;

pub use crate::model::MakefileConfig;
use regex::Regex;

/// Join `\`-continued lines into single logical lines.
fn unfold_multiline(lines: &[String]) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    for l in lines {
        let trimmed = l.trim_end();
        if let Some(head) = trimmed.strip_suffix('\\') {
            current.push_str(head);
            current.push(' ');
        } else {
            current.push_str(trimmed);
            result.push(current.clone());
            current.clear();
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

fn words(val: &str) -> impl Iterator<Item = String> + '_ {
    val.split_whitespace().map(|s| s.to_string())
}

fn prefixed(val: &str, prefix: &str) -> Vec<String> {
    val.split_whitespace()
        .filter_map(|token| token.strip_prefix(prefix))
        .map(|s| s.to_string())
        .collect()
}

/// Parse the variable assignments of a generated Makefile. Later
/// assignments to the same scalar win; list variables accumulate.
pub fn parse_makefile(content: &str) -> MakefileConfig {
    let lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();
    let lines = unfold_multiline(&lines);

    let mut cfg = MakefileConfig::default();

    let re_assign = Regex::new(r"^([A-Z0-9_-]+)\s*[:+]?=\s*(.*)$").unwrap();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(cap) = re_assign.captures(line) {
            let key = &cap[1];
            let val = cap[2].trim();

            match key {
                "TARGET" => cfg.target = Some(val.into()),
                "MCU" => cfg.mcu = Some(val.into()),
                "C_SOURCES" => cfg.c_sources.extend(words(val)),
                "ASM_SOURCES" => cfg.asm_sources.extend(words(val)),
                "C_INCLUDES" => cfg.c_includes.extend(prefixed(val, "-I")),
                "AS_INCLUDES" => cfg.as_includes.extend(prefixed(val, "-I")),
                "C_DEFS" => cfg.c_defs.extend(prefixed(val, "-D")),
                "AS_DEFS" => cfg.as_defs.extend(prefixed(val, "-D")),
                "LDSCRIPT" => cfg.ldscript = Some(val.into()),
                "SPECS" => cfg.specs = Some(val.into()),
                _ => {}
            }
        }
    }

    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAKEFILE: &str = "\
# header
TARGET = blinky
MCU = -mthumb -mcpu=cortex-m4
C_SOURCES = \\
../Src/main.c\\
../Src/main.c
ASM_SOURCES = \\

C_INCLUDES = -I../Inc -I../Drivers
C_DEFS = -DUSE_HAL\\(V2\\) -DSTM32F407xx
AS_DEFS =
CFLAGS = $(MCU) $(C_DEFS)
CFLAGS += -g
LDSCRIPT = ../flash.ld
SPECS = -specs=nano.specs -specs=nosys.specs
";

    #[test]
    fn reads_back_generated_variables() {
        let cfg = parse_makefile(MAKEFILE);
        assert_eq!(cfg.target.as_deref(), Some("blinky"));
        assert_eq!(cfg.mcu.as_deref(), Some("-mthumb -mcpu=cortex-m4"));
        assert_eq!(cfg.c_sources, ["../Src/main.c", "../Src/main.c"]);
        assert!(cfg.asm_sources.is_empty());
        assert_eq!(cfg.c_includes, ["../Inc", "../Drivers"]);
        assert_eq!(cfg.c_defs, ["USE_HAL\\(V2\\)", "STM32F407xx"]);
        assert!(cfg.as_defs.is_empty());
        assert_eq!(cfg.ldscript.as_deref(), Some("../flash.ld"));
        assert_eq!(
            cfg.specs.as_deref(),
            Some("-specs=nano.specs -specs=nosys.specs")
        );
    }
}
