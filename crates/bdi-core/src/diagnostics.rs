//! Non-fatal validation warnings.
//!
//! Diagnostics never abort construction: the object is built with a best-effort value and the
//! warning goes to the `bdi::diagnostics` tracing target.

/// A recoverable problem detected while building beliefs, goals or desires.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("{kind} `{id}` was created with a non-JSON value: {reason}")]
    NonJsonValue {
        kind: &'static str,
        id: String,
        reason: String,
    },

    #[error("desire `{id}` was declared twice; the later body replaces the earlier one")]
    DuplicateDesire { id: String },
}

impl Diagnostic {
    pub fn id(&self) -> &str {
        match self {
            Diagnostic::NonJsonValue { id, .. } | Diagnostic::DuplicateDesire { id } => id,
        }
    }
}

/// Emit a diagnostic on the `bdi::diagnostics` target.
pub fn report(diagnostic: &Diagnostic) {
    tracing::warn!(target: "bdi::diagnostics", id = diagnostic.id(), "{diagnostic}");
}
