//! The resolved configuration and its read accessors.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::builder::Loader;
use crate::defaults;
use crate::error::ConfigError;
use crate::i18n::Translate;
use crate::value::{Section, Value};

/// An immutable, fully-populated configuration tree.
///
/// Every section of the default tree is present, every value typed by its
/// default. Nothing mutates after construction, so a `Config` can be shared
/// across threads without locking.
pub struct Config {
    sections: IndexMap<String, Section>,
    translator: Box<dyn Translate>,
}

impl Config {
    /// Load from the default candidate directories under `root`.
    ///
    /// Shorthand for `Config::loader(root).load()`.
    pub fn load(root: impl Into<PathBuf>) -> Result<Config, ConfigError> {
        Loader::new(root).load()
    }

    /// Start a customized load.
    pub fn loader(root: impl Into<PathBuf>) -> Loader {
        Loader::new(root)
    }

    pub(crate) fn new(
        sections: IndexMap<String, Section>,
        translator: Box<dyn Translate>,
    ) -> Config {
        Config {
            sections,
            translator,
        }
    }

    /// The compiled default tree, before any merging. Never mutated.
    pub fn defaults() -> &'static IndexMap<String, Section> {
        defaults::defaults()
    }

    /// All resolved sections, in default-tree order. The map serializes
    /// cleanly if a JSON view is needed downstream.
    pub fn sections(&self) -> &IndexMap<String, Section> {
        &self.sections
    }

    /// One resolved section by name.
    pub fn section(&self, name: &str) -> Result<&Section, ConfigError> {
        self.sections.get(name).ok_or_else(|| {
            ConfigError::unknown_section(name, self.app_name(), self.translator.as_ref())
        })
    }

    /// A key from `[main]`, where most application settings live.
    pub fn key(&self, key: &str) -> Result<&Value, ConfigError> {
        self.key_in("main", key)
    }

    /// A key from a named section.
    pub fn key_in(&self, section: &str, key: &str) -> Result<&Value, ConfigError> {
        let values = self.section(section)?;
        values
            .get(key)
            .ok_or_else(|| ConfigError::invalid_key(section, key, self.translator.as_ref()))
    }

    // The resolved application name for error text. The compiled default
    // stands in if the tree somehow lacks one.
    fn app_name(&self) -> &str {
        self.sections
            .get("main")
            .and_then(|main| main.get("name"))
            .and_then(|name| name.as_str())
            .unwrap_or("Driftbin")
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("sections", &self.sections)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{config_defaults, config_from_ini};

    #[test]
    fn every_default_section_is_accessible() {
        let config = config_defaults();
        for name in Config::defaults().keys() {
            assert!(config.section(name).is_ok(), "section [{name}] missing");
        }
    }

    #[test]
    fn key_reads_main() {
        let config = config_defaults();
        assert_eq!(config.key("name").unwrap(), &Value::Str("Driftbin".into()));
        assert_eq!(config.key("qrcode").unwrap(), &Value::Bool(true));
    }

    #[test]
    fn key_in_reads_other_sections() {
        let config = config_defaults();
        assert_eq!(
            config.key_in("purge", "batchsize").unwrap(),
            &Value::Int(10)
        );
        assert_eq!(
            config.key_in("expire", "default").unwrap(),
            &Value::Str("1week".into())
        );
    }

    #[test]
    fn unknown_section_error_carries_resolved_name() {
        let config = config_from_ini("[main]\nname = My Bin\n[model]\n[model_options]\n");
        let err = config.section("nonexistent").unwrap_err();
        match err {
            ConfigError::UnknownSection { section, message } => {
                assert_eq!(section, "nonexistent");
                assert_eq!(
                    message,
                    "My Bin requires configuration section [nonexistent] to be present in configuration file."
                );
            }
            other => panic!("expected UnknownSection, got {other:?}"),
        }
    }

    #[test]
    fn invalid_key_error_names_section_and_key() {
        let config = config_defaults();
        let err = config.key("nonexistent").unwrap_err();
        match err {
            ConfigError::InvalidKey { section, key, message } => {
                assert_eq!(section, "main");
                assert_eq!(key, "nonexistent");
                assert_eq!(message, "Invalid data. main / nonexistent");
            }
            other => panic!("expected InvalidKey, got {other:?}"),
        }
    }

    #[test]
    fn invalid_section_wins_over_invalid_key() {
        let config = config_defaults();
        let err = config.key_in("nonexistent", "whatever").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSection { .. }));
    }

    #[test]
    fn defaults_accessor_is_the_compiled_tree() {
        assert_eq!(
            Config::defaults().get_index_of("sri"),
            Some(Config::defaults().len() - 1)
        );
    }

    #[test]
    fn sections_serialize_to_json() {
        let config = config_defaults();
        let json = serde_json::to_value(config.sections()).unwrap();
        assert_eq!(json["purge"]["limit"], serde_json::json!(300));
        assert_eq!(json["main"]["discussion"], serde_json::json!(true));
        assert_eq!(json["main"]["basepath"], serde_json::json!(""));
        assert!(json["main"]["availabletemplates"].is_array());
    }

    #[test]
    fn debug_omits_the_translator() {
        let rendered = format!("{:?}", config_defaults());
        assert!(rendered.starts_with("Config"));
        assert!(rendered.contains("sections"));
        assert!(rendered.ends_with(".. }"));
    }
}
