use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Defaults read from a TOML file; command line flags take precedence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub rows: Option<i64>,
    pub columns: Option<i64>,
    pub mines: Option<i64>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Values from `overrides` win where present.
    pub fn overridden_by(self, overrides: Settings) -> Self {
        Self {
            rows: overrides.rows.or(self.rows),
            columns: overrides.columns.or(self.columns),
            mines: overrides.mines.or(self.mines),
            seed: overrides.seed.or(self.seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_file() {
        let settings = Settings::parse("rows = 9\ncolumns = 9\n").unwrap();
        assert_eq!(settings.rows, Some(9));
        assert_eq!(settings.columns, Some(9));
        assert_eq!(settings.mines, None);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Settings::parse("difficulty = \"expert\"").is_err());
    }

    #[test]
    fn flags_override_file() {
        let file = Settings {
            rows: Some(9),
            columns: Some(9),
            mines: Some(10),
            seed: Some(1),
        };
        let flags = Settings {
            mines: Some(20),
            ..Default::default()
        };
        let merged = file.overridden_by(flags);
        assert_eq!(merged.rows, Some(9));
        assert_eq!(merged.mines, Some(20));
        assert_eq!(merged.seed, Some(1));
    }
}
