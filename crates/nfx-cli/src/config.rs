use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use nfx_types::NoteId;

use crate::cli::OutputFormat;

/// Defaults read from a TOML file; command-line flags win over these.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub database: Option<PathBuf>,
    pub format: OutputFormat,
    pub notes: Vec<NoteId>,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert!(c.database.is_none());
        assert_eq!(c.format, OutputFormat::Csv);
        assert!(c.notes.is_empty());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nfx.toml");
        std::fs::write(
            &path,
            "database = \"/evidence/NoteStore.sqlite\"\nformat = \"json\"\nnotes = [4, 8]\n",
        )
        .unwrap();

        let c = CliConfig::load(&path).unwrap();
        assert_eq!(c.database, Some(PathBuf::from("/evidence/NoteStore.sqlite")));
        assert_eq!(c.format, OutputFormat::Json);
        assert_eq!(c.notes, vec![NoteId::new(4), NoteId::new(8)]);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nfx.toml");
        std::fs::write(&path, "notes = [1]\n").unwrap();
        let c = CliConfig::load(&path).unwrap();
        assert_eq!(c.format, OutputFormat::Csv);
        assert!(c.database.is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(&dir.path().join("absent.toml")).is_err());
    }
}
