//! The loading front door: discovery, parsing and resolution wired together.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::ConfigError;
use crate::i18n::{Identity, Translate};
use crate::ini;
use crate::resolve::{self, ResolveInput};
use crate::source::{self, CONFIG_PATH_VAR};
use crate::value::RawConfig;

/// Builder for customized configuration loading.
///
/// The plain path is [`Config::load`]; the builder exists for the cases that
/// need more control:
///
/// - **Discovery**: [`search_dirs()`](Self::search_dirs) replaces the default
///   candidate directories (`$DRIFTBIN_CONFIG_PATH`, then `{root}/cfg`).
/// - **Environment**: [`env_vars()`](Self::env_vars) replaces the process
///   environment with an explicit snapshot, so tests never touch `set_var`.
/// - **Translation**: [`translator()`](Self::translator) plugs in a message
///   catalog for error text.
/// - **No I/O at all**: [`from_raw()`](Self::from_raw) resolves pre-parsed
///   sections directly, skipping discovery.
pub struct Loader {
    root: PathBuf,
    search_dirs: Option<Vec<PathBuf>>,
    env_vars: Option<Vec<(String, String)>>,
    translator: Box<dyn Translate>,
}

impl Loader {
    pub fn new(root: impl Into<PathBuf>) -> Loader {
        Loader {
            root: root.into(),
            search_dirs: None,
            env_vars: None,
            translator: Box::new(Identity),
        }
    }

    /// Replace the candidate directories entirely. Directories are walked in
    /// order; the first readable `conf.ini` wins.
    pub fn search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = Some(dirs);
        self
    }

    /// Replace the process environment with an explicit snapshot.
    ///
    /// With duplicate names the last pair wins; empty values count as unset.
    pub fn env_vars(mut self, vars: Vec<(String, String)>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Use a message catalog for error text (default: [`Identity`]).
    pub fn translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    /// Discover, parse and resolve.
    ///
    /// Finding no source file is not an error; resolution proceeds from pure
    /// defaults. A found file must carry the mandatory sections.
    pub fn load(self) -> Result<Config, ConfigError> {
        let mut input = ResolveInput {
            raw: None,
            root: self.root,
            env_vars: Self::effective_env_vars(self.env_vars),
        };
        let dirs = match self.search_dirs {
            Some(dirs) => dirs,
            None => {
                source::candidate_dirs(&input.root, input.env(CONFIG_PATH_VAR))
            }
        };
        input.raw = source::read_first(&dirs).map(|(_, text)| ini::parse(&text));

        let sections = resolve::resolve(&input, self.translator.as_ref())?;
        Ok(Config::new(sections, self.translator))
    }

    /// Resolve pre-parsed sections, no discovery. `None` means "no source
    /// found" (defaults only); `Some` counts as a loaded source and must pass
    /// mandatory-section validation even when empty.
    pub fn from_raw(self, raw: Option<RawConfig>) -> Result<Config, ConfigError> {
        let input = ResolveInput {
            raw,
            root: self.root,
            env_vars: Self::effective_env_vars(self.env_vars),
        };
        let sections = resolve::resolve(&input, self.translator.as_ref())?;
        Ok(Config::new(sections, self.translator))
    }

    fn effective_env_vars(snapshot: Option<Vec<(String, String)>>) -> Vec<(String, String)> {
        snapshot.unwrap_or_else(|| std::env::vars().collect())
    }
}
