//! Wizard error type.

use crate::store::StoreError;

/// Errors produced by wizard sessions.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// A field edit named a category or field the configuration does not have.
    #[error("unknown field: {category}.{field}")]
    UnknownField { category: String, field: String },

    /// `save` was invoked while an earlier save is still awaiting the store.
    #[error("save already in progress")]
    SaveInProgress,

    /// The session was saved or closed; it accepts no further commands.
    #[error("wizard session has finished")]
    Finished,

    /// The project store rejected the save. Displays the store's message verbatim.
    #[error("{0}")]
    Persistence(#[from] StoreError),
}

impl WizardError {
    pub(crate) fn unknown_field(category: &str, field: &str) -> Self {
        Self::UnknownField { category: category.to_owned(), field: field.to_owned() }
    }

    /// Grepable code for structured error events.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "E_UNKNOWN_FIELD",
            Self::SaveInProgress => "E_SAVE_IN_PROGRESS",
            Self::Finished => "E_SESSION_FINISHED",
            Self::Persistence(_) => "E_PERSISTENCE",
        }
    }

    /// Whether the caller may repeat the same command unchanged.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::SaveInProgress | Self::Persistence(_))
    }
}
