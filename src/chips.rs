use crate::config::ChipTable;
use crate::error::{ConvertError, Result};
use regex::Regex;
use tracing::debug;

const BUILTIN_TABLE: &str = include_str!("chips.toml");

struct ChipRule {
    pattern: Regex,
    flags: String,
}

/// Maps an MCU name to the `-mcpu`/FPU flags shared by compiler and linker.
pub struct ChipResolver {
    rules: Vec<ChipRule>,
}

impl ChipResolver {
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_TABLE)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let table: ChipTable = toml::from_str(text).map_err(|e| ConvertError::ChipTable {
            reason: e.to_string(),
        })?;
        Self::from_table(table)
    }

    pub fn from_table(table: ChipTable) -> Result<Self> {
        let rules = table
            .family
            .into_iter()
            .map(|family| {
                // Anchor at the start only; suffixes name package and flash size.
                let pattern = Regex::new(&format!("^(?:{})", family.pattern)).map_err(|e| {
                    ConvertError::ChipTable {
                        reason: format!("pattern {:?}: {}", family.pattern, e),
                    }
                })?;
                Ok(ChipRule {
                    pattern,
                    flags: family.flags,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ChipResolver { rules })
    }

    pub fn resolve(&self, mcu: &str) -> Result<&str> {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.pattern.is_match(mcu))
            .ok_or_else(|| ConvertError::UnsupportedChip {
                mcu: mcu.to_string(),
            })?;
        debug!("MCU {} -> {}", mcu, rule.flags);
        Ok(&rule.flags)
    }
}
