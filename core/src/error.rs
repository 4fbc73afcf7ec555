//! Errors raised while building the command model from raw descriptors.

use thiserror::Error;

/// Input-contract violations found while validating manifest records.
///
/// Every variant is fatal for a generation run: the manifest is the single
/// source of truth and a partially documented command set is never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A parameter descriptor sets the unsupported `who` scoping field.
    #[error("parameter '{param}' sets unsupported field 'who'")]
    UnsupportedWho { param: String },

    /// A parameter descriptor names a type tag outside the known set.
    #[error("unknown parameter type '{tag}'{}", for_param(.param))]
    UnknownParamType { param: Option<String>, tag: String },

    /// A parameter error, tagged with the signature prefix of its command.
    #[error("command '{command}': {source}")]
    InCommand {
        command: String,
        #[source]
        source: Box<ModelError>,
    },
}

fn for_param(param: &Option<String>) -> String {
    param
        .as_deref()
        .map(|name| format!(" for parameter '{name}'"))
        .unwrap_or_default()
}

/// Convenience alias for results with [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;
