//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Session not set in state
    #[error("Session not set in state")]
    SessionNotSet,

    /// User record not found in state
    #[error("User not found: {id}")]
    #[allow(dead_code)]
    UserNotFound { id: i64 },

    /// No form is active for the current view
    #[error("No form is active for the current view")]
    #[allow(dead_code)]
    FormNotActive,

    /// Generic state error
    #[error("State error: {0}")]
    #[allow(dead_code)]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::SessionNotSet;
        assert!(error.to_string().contains("Session not set"));

        let error = StateError::UserNotFound { id: 9 };
        assert!(error.to_string().contains("User not found"));
        assert!(error.to_string().contains('9'));

        let error = StateError::FormNotActive;
        assert!(error.to_string().contains("No form is active"));

        let error = StateError::Other("Generic error".to_string());
        assert!(error.to_string().contains("State error"));
        assert!(error.to_string().contains("Generic error"));
    }
}
