use thiserror::Error;

use crate::i18n::Translate;

/// Errors surfaced by resolution and the read accessors.
///
/// Messages are built through the [`Translate`] catalog when the error is
/// constructed, so `Display` needs no further context. The structured fields
/// stay untranslated for programmatic matching.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source file was found but lacks one of the mandatory sections.
    #[error("{message}")]
    MissingSection { section: String, message: String },

    /// A caller asked for a section the resolved tree does not contain.
    #[error("{message}")]
    UnknownSection { section: String, message: String },

    /// A caller asked for a key absent from an existing section.
    #[error("{message}")]
    InvalidKey {
        section: String,
        key: String,
        message: String,
    },
}

impl ConfigError {
    // The brand is literal here: this fires before [main] name is resolved.
    pub(crate) fn missing_section(section: &str, translator: &dyn Translate) -> Self {
        let message = translator.translate(
            "Driftbin requires configuration section [%s] to be present in configuration file.",
            &[section],
        );
        ConfigError::MissingSection {
            section: section.to_string(),
            message,
        }
    }

    // The resolved application name is itself a catalog entry, so it is
    // translated before being substituted into the template.
    pub(crate) fn unknown_section(
        section: &str,
        app_name: &str,
        translator: &dyn Translate,
    ) -> Self {
        let translated_name = translator.translate(app_name, &[]);
        let message = translator.translate(
            "%s requires configuration section [%s] to be present in configuration file.",
            &[&translated_name, section],
        );
        ConfigError::UnknownSection {
            section: section.to_string(),
            message,
        }
    }

    pub(crate) fn invalid_key(section: &str, key: &str, translator: &dyn Translate) -> Self {
        let message = format!(
            "{} {section} / {key}",
            translator.translate("Invalid data.", &[])
        );
        ConfigError::InvalidKey {
            section: section.to_string(),
            key: key.to_string(),
            message,
        }
    }
}
