//! Layered INI configuration for the Driftbin paste service.
//!
//! A compiled-in default tree defines every section and key the application
//! reads, along with each key's type. An optional `conf.ini` overrides it:
//!
//! ```ignore
//! let config = Config::load("/srv/driftbin")?;
//! let limit = config.key("sizelimit")?;
//! ```
//!
//! That single call walks the candidate directories (`$DRIFTBIN_CONFIG_PATH`,
//! then `{root}/cfg`), parses the first readable `conf.ini`, merges it over
//! the defaults with type coercion, and hands back a fully-populated,
//! immutable [`Config`].
//!
//! # Design: defaults as schema
//!
//! The default tree is the schema. Every recognized section and key has a
//! default entry whose variant fixes the key's type; merging coerces each raw
//! source value to the variant of its default. An administrator's file is
//! always sparse — it names only the keys it changes, everything else falls
//! through to the defaults — and the resolved tree is always complete: no
//! missing keys, no type surprises downstream.
//!
//! Sections come in two flavors:
//!
//! - **Fixed schema** (most sections): keys are enumerated by the defaults.
//!   Raw values are coerced per key, unknown raw keys are dropped.
//! - **Free form** (names ending in `_options`, except `model_options`): the
//!   raw section replaces the defaults wholesale, so administrators can
//!   define their own expiry durations or formatter labels. Values are
//!   integer-coerced when the section's defaults lead with an integer.
//!
//! Two sections get special handling. `model_options` swaps its defaults for
//! a backend-specific skeleton when `[model] class` names a known storage
//! backend (`Database`, `GoogleCloudStorage`, `S3Storage`); raw values still
//! win per key. `sri` is replaced wholesale by the raw section, so
//! administrator-configured integrity hashes are never mixed with stale
//! defaults.
//!
//! # Coercion
//!
//! Source files are hand-edited INI, so coercion is deliberately loose:
//! `yes`, `on` and `true` all mean `true`; an integer is read from the
//! leading digits of the raw string; an empty string never overrides a
//! non-null string default. Defaults of `Null` mark nullable credential-like
//! fields whose raw values pass through untyped.
//!
//! # Fixups
//!
//! After merging, two documented corrections run: `expire.default` falls back
//! to the first resolved expiry option when it names a nonexistent one, and a
//! non-empty `main.basepath` gains a trailing `/`. Both are policy, not error
//! recovery; nothing else is corrected silently.
//!
//! # Errors
//!
//! All fallible operations return [`ConfigError`]. A found source file must
//! carry the `[main]`, `[model]` and `[model_options]` sections (an absent
//! file is fine — pure defaults are valid); accessor misses report the
//! section and key. Message text routes through the [`Translate`] hook so
//! applications can plug in a localized catalog.
//!
//! # Concurrency
//!
//! Resolution is one synchronous pass at startup. The default tree is a
//! process-wide constant and a resolved [`Config`] never mutates, so both are
//! safe for unsynchronized concurrent reads.

pub mod error;
pub mod ini;

mod backend;
mod builder;
mod config;
mod defaults;
mod i18n;
mod merge;
mod resolve;
mod source;
mod value;

#[cfg(test)]
mod fixtures;

pub use builder::Loader;
pub use config::Config;
pub use error::ConfigError;
pub use i18n::{Identity, Translate, format_template};
pub use resolve::{ResolveInput, resolve};
pub use source::CONFIG_FILE;
pub use value::{RawConfig, RawSection, RawValue, Section, Value};
