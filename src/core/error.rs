use thiserror::Error;

/// Rejection of a projection request before any month is simulated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

impl InvalidInputError {
    /// Message shown to someone filling in the form.
    pub fn user_message(&self) -> String {
        format!("Please fill all fields correctly ({self})")
    }
}
