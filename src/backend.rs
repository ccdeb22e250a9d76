//! Storage backend skeletons for `model_options`.
//!
//! Once a source file selects a storage backend in `[model]`, the stock
//! `model_options` defaults (a filesystem data directory) no longer fit.
//! Each known backend carries its own default skeleton, substituted for the
//! stock defaults before the `model_options` merge; raw values still win per
//! key. An unrecognized class name substitutes nothing, so the stock
//! defaults apply.

use crate::defaults::section;
use crate::resolve::ResolveInput;
use crate::value::{Section, Value};

/// Seeds the GoogleCloudStorage skeleton's bucket when set and non-empty.
pub(crate) const GCS_BUCKET_VAR: &str = "DRIFTBIN_GCS_BUCKET";

/// Storage backends with a `model_options` skeleton of their own. The class
/// name must match exactly; there is no normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Backend {
    Database,
    GoogleCloudStorage,
    S3Storage,
}

impl Backend {
    pub(crate) fn from_class(class: &str) -> Option<Backend> {
        match class {
            "Database" => Some(Backend::Database),
            "GoogleCloudStorage" => Some(Backend::GoogleCloudStorage),
            "S3Storage" => Some(Backend::S3Storage),
            _ => None,
        }
    }

    /// The substitute defaults for the `model_options` merge.
    pub(crate) fn skeleton(self, input: &ResolveInput) -> Section {
        match self {
            Backend::Database => section([
                (
                    "dsn",
                    format!(
                        "sqlite:{}",
                        input.root.join("data").join("db.sq3").display()
                    )
                    .into(),
                ),
                ("tbl", Value::Null),
                ("usr", Value::Null),
                ("pwd", Value::Null),
                ("opt", Value::List(vec![])),
            ]),
            Backend::GoogleCloudStorage => section([
                (
                    "bucket",
                    match input.env(GCS_BUCKET_VAR) {
                        Some(bucket) => bucket.into(),
                        None => Value::Null,
                    },
                ),
                ("prefix", "pastes".into()),
                ("uniformacl", false.into()),
            ]),
            Backend::S3Storage => section([
                ("region", Value::Null),
                ("version", Value::Null),
                ("endpoint", Value::Null),
                ("accesskey", Value::Null),
                ("secretkey", Value::Null),
                ("use_path_style_endpoint", Value::Null),
                ("bucket", Value::Null),
                ("prefix", "".into()),
            ]),
        }
    }
}
