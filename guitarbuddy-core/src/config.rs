use std::path::{Path, PathBuf};

use serde::Deserialize;

use guitarbuddy_types::ScaleType;

use crate::engine::normalize_root;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    output: OutputConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    root: Option<String>,
    scale: Option<String>,
}

#[derive(Deserialize, Default)]
struct OutputConfig {
    format: Option<String>,
    unicode_accidentals: Option<bool>,
}

/// How the command-line front end renders results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct Config {
    defaults: DefaultsConfig,
    output: OutputConfig,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        Self::load_from(user_config_path().as_deref())
    }

    /// Embedded defaults merged with the file at `path`. A missing, unreadable
    /// or malformed file leaves the embedded defaults in place.
    pub fn load_from(path: Option<&Path>) -> Self {
        let mut base: ConfigFile = match toml::from_str(DEFAULT_CONFIG) {
            Ok(base) => base,
            Err(e) => {
                log::error!(target: "config", "embedded config.toml is invalid: {}", e);
                ConfigFile::default()
            }
        };

        if let Some(path) = path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_defaults(&mut base.defaults, user.defaults);
                            merge_output(&mut base.output, user.output);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            output: base.output,
        }
    }

    /// Root used when none is given, normalized to a table spelling.
    pub fn default_root(&self) -> String {
        self.defaults
            .root
            .as_deref()
            .and_then(normalize_root)
            .unwrap_or_else(|| "C".to_string())
    }

    pub fn default_scale(&self) -> ScaleType {
        self.defaults
            .scale
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ScaleType::Major)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .format
            .as_deref()
            .and_then(parse_output_format)
            .unwrap_or_default()
    }

    pub fn unicode_accidentals(&self) -> bool {
        self.output.unicode_accidentals.unwrap_or(false)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("guitarbuddy").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.root.is_some() {
        base.root = user.root;
    }
    if user.scale.is_some() {
        base.scale = user.scale;
    }
}

fn merge_output(base: &mut OutputConfig, user: OutputConfig) {
    if user.format.is_some() {
        base.format = user.format;
    }
    if user.unicode_accidentals.is_some() {
        base.unicode_accidentals = user.unicode_accidentals;
    }
}

fn parse_output_format(s: &str) -> Option<OutputFormat> {
    match s.to_lowercase().as_str() {
        "text" | "plain" => Some(OutputFormat::Text),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn user_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_embedded_config() {
        let config = Config::load_from(None);
        assert_eq!(config.default_root(), "C");
        assert_eq!(config.default_scale(), ScaleType::Major);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(!config.unicode_accidentals());
    }

    #[test]
    fn test_user_overrides_merge_per_field() {
        let file = user_file("[defaults]\nroot = \"f#\"\n\n[output]\nformat = \"JSON\"\n");
        let config = Config::load_from(Some(file.path()));
        assert_eq!(config.default_root(), "F#");
        assert_eq!(config.default_scale(), ScaleType::Major);
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(!config.unicode_accidentals());
    }

    #[test]
    fn test_malformed_user_config_ignored() {
        let file = user_file("[defaults\nroot = ");
        let config = Config::load_from(Some(file.path()));
        assert_eq!(config.default_root(), "C");
        assert_eq!(config.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_missing_user_config_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(dir.path().join("absent.toml").as_path()));
        assert_eq!(config.default_scale(), ScaleType::Major);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let file = user_file("[defaults]\nroot = \"H\"\nscale = \"lydian\"\n\n[output]\nformat = \"xml\"\n");
        let config = Config::load_from(Some(file.path()));
        assert_eq!(config.default_root(), "C");
        assert_eq!(config.default_scale(), ScaleType::Major);
        assert_eq!(config.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("text"), Some(OutputFormat::Text));
        assert_eq!(parse_output_format("Json"), Some(OutputFormat::Json));
        assert_eq!(parse_output_format("yaml"), None);
    }
}
