// ABOUTME: Explicit configuration struct loaded from TOML with CLI overrides
// ABOUTME: Built once at startup and passed by reference, no global state

use crate::cli::Cli;
use crate::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web UI domain, e.g. https://your-company.quip.com
    pub domain: String,

    /// REST API base URL
    pub api_base: String,

    /// Where exported files land (testing mode overrides this)
    pub output_folder: PathBuf,

    /// Manifest filename, relative to the export root
    pub manifest_file: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Folder to start from; defaults to the API's private folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_folder_id: Option<String>,

    /// Skip documents that already exist locally
    pub dupe_check: bool,

    /// Root the export at test-export/ and start from example_folder_id
    pub testing: bool,

    /// Slow down browser actions for debugging
    pub slow_mo: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_folder_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            domain: "https://quip.com".into(),
            api_base: "https://platform.quip.com".into(),
            output_folder: PathBuf::from("quip_exports"),
            manifest_file: "manifest.jsonl".into(),
            api_token: None,
            email: None,
            password: None,
            root_folder_id: None,
            dupe_check: true,
            testing: false,
            slow_mo: false,
            example_folder_id: None,
        }
    }
}

impl Config {
    /// Load from an explicit path or the platform config dir; a missing
    /// file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// CLI flags win over file values.
    pub fn merged_with(mut self, cli: &Cli) -> Self {
        if let Some(domain) = &cli.domain {
            self.domain = domain.clone();
        }
        if let Some(api_base) = &cli.api_base {
            self.api_base = api_base.clone();
        }
        if let Some(output) = &cli.output {
            self.output_folder = output.clone();
        }
        if let Some(folder) = &cli.folder {
            self.root_folder_id = Some(folder.clone());
        }
        if cli.no_dupe_check {
            self.dupe_check = false;
        }
        if cli.testing {
            self.testing = true;
        }
        if cli.slow_mo {
            self.slow_mo = true;
        }
        self
    }

    pub fn export_root(&self) -> PathBuf {
        if self.testing {
            PathBuf::from("test-export")
        } else {
            self.output_folder.clone()
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.export_root().join(&self.manifest_file)
    }
}

fn default_config_path() -> Result<PathBuf> {
    ProjectDirs::from("", "", "quipex")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or_else(|| Error::Config("could not determine config directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base, "https://platform.quip.com");
        assert_eq!(config.manifest_file, "manifest.jsonl");
        assert!(config.dupe_check);
        assert!(!config.testing);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(&temp.path().join("missing.toml"))).unwrap();
        assert_eq!(config.output_folder, PathBuf::from("quip_exports"));
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
domain = "https://acme.quip.com"
email = "ada@acme.com"
dupe_check = false
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.domain, "https://acme.quip.com");
        assert_eq!(config.email.as_deref(), Some("ada@acme.com"));
        assert!(!config.dupe_check);
        // Untouched fields keep their defaults
        assert_eq!(config.api_base, "https://platform.quip.com");
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "domain = [not toml").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = Cli::parse_from([
            "quipex",
            "--domain",
            "https://cli.quip.com",
            "--no-dupe-check",
            "--testing",
        ]);

        let config = Config::default().merged_with(&cli);
        assert_eq!(config.domain, "https://cli.quip.com");
        assert!(!config.dupe_check);
        assert!(config.testing);
        // Flags not passed leave file/default values alone
        assert_eq!(config.api_base, "https://platform.quip.com");
    }

    #[test]
    fn test_testing_mode_paths() {
        let mut config = Config::default();
        assert_eq!(config.export_root(), PathBuf::from("quip_exports"));

        config.testing = true;
        assert_eq!(config.export_root(), PathBuf::from("test-export"));
        assert_eq!(
            config.manifest_path(),
            PathBuf::from("test-export").join("manifest.jsonl")
        );
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.root_folder_id = Some("fold1".into());
        config.slow_mo = true;

        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.root_folder_id.as_deref(), Some("fold1"));
        assert!(parsed.slow_mo);
    }
}
