use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::emit::CONFIG_FIELD;
use crate::utils::{front_matter_end, strip_quotes};

pub const CONFIG_FILE_NAME: &str = ".qlotrc.json";

/// Project-level defaults loaded from `.qlotrc.json`.
///
/// Per-document settings in the front matter `localize:` section and CLI
/// flags both take precedence over these values.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
}

fn default_includes() -> Vec<String> {
    vec!["**/*.qmd".to_string()]
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_source_lang() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: default_includes(),
            languages: default_languages(),
            source_lang: default_source_lang(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes`
    /// are invalid, or if the language list is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        for pattern in &self.includes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
        }
        if self.languages.is_empty() {
            anyhow::bail!("'languages' must list at least one language");
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

/// Per-document settings read from the `localize:` section of the front
/// matter. Anything absent falls back to the project config.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DocumentOptions {
    pub languages: Option<Vec<String>>,
    pub source_lang: Option<String>,
}

impl DocumentOptions {
    pub fn from_front_matter(lines: &[String]) -> Self {
        let mut opts = Self::default();
        let Some(end) = front_matter_end(lines) else {
            return opts;
        };

        let mut in_section = false;
        let mut in_language_list = false;
        for line in &lines[1..end] {
            if !line.starts_with(' ') && !line.starts_with('\t') {
                in_section = line.trim_end() == format!("{}:", CONFIG_FIELD);
                in_language_list = false;
                continue;
            }
            if !in_section {
                continue;
            }

            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix("languages:") {
                let rest = rest.trim();
                if let Some(inline) = rest.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
                    let langs: Vec<String> = inline
                        .split(',')
                        .map(|l| strip_quotes(l.trim()).to_string())
                        .filter(|l| !l.is_empty())
                        .collect();
                    opts.languages = Some(langs);
                    in_language_list = false;
                } else if rest.is_empty() {
                    opts.languages.get_or_insert_with(Vec::new);
                    in_language_list = true;
                }
            } else if let Some(rest) = trimmed.strip_prefix("source:") {
                let value = strip_quotes(rest.trim());
                if !value.is_empty() {
                    opts.source_lang = Some(value.to_string());
                }
                in_language_list = false;
            } else if let Some(item) = trimmed.strip_prefix("- ") {
                if in_language_list {
                    let value = strip_quotes(item.trim()).to_string();
                    if !value.is_empty() {
                        if let Some(langs) = opts.languages.as_mut() {
                            langs.push(value);
                        }
                    }
                }
            }
        }
        opts
    }
}
