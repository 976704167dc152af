use crate::models::BiometryType;
use thiserror::Error;

/// Structured error reported by the device authentication boundary and the
/// flow built on top of it. Each variant carries a stable machine-readable
/// code matching the platform error domain, plus a human-readable
/// description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authentication was not successful because the user failed to provide valid credentials")]
    AuthenticationFailed,

    #[error("Authentication was canceled by the user")]
    UserCancel,

    #[error("The user tapped the fallback button to enter their credentials a different way")]
    UserFallback,

    #[error("Authentication was canceled by the system")]
    SystemCancel,

    #[error("A passcode is not set on the device")]
    PasscodeNotSet,

    #[error("Biometric authentication is not available on this device")]
    BiometryNotAvailable,

    #[error("The user has no enrolled biometric identities")]
    BiometryNotEnrolled,

    #[error("Biometric authentication is locked out after too many failed attempts")]
    BiometryLockout,

    #[error("Authentication was canceled by the application")]
    AppCancel,

    #[error("The authentication context is no longer valid")]
    InvalidContext,

    #[error("No paired companion device is available to authenticate with")]
    CompanionNotAvailable,

    #[error("Authentication is not possible without user interaction")]
    NotInteractive,

    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Capability check passed but the biometry classification is {0}; check and classification disagree")]
    ContractViolation(BiometryType),

    #[error("An authentication attempt is already in flight")]
    AttemptInProgress,
}

impl AuthError {
    /// Machine-readable code. Negative codes mirror the platform error
    /// domain; `ContractViolation` and `AttemptInProgress` are local to this
    /// application.
    pub fn code(&self) -> i32 {
        match self {
            AuthError::AuthenticationFailed => -1,
            AuthError::UserCancel => -2,
            AuthError::UserFallback => -3,
            AuthError::SystemCancel => -4,
            AuthError::PasscodeNotSet => -5,
            AuthError::BiometryNotAvailable => -6,
            AuthError::BiometryNotEnrolled => -7,
            AuthError::BiometryLockout => -8,
            AuthError::AppCancel => -9,
            AuthError::InvalidContext => -10,
            AuthError::CompanionNotAvailable => -11,
            AuthError::NotInteractive => -1004,
            AuthError::Unknown(_) => 0,
            AuthError::ContractViolation(_) => -9999,
            AuthError::AttemptInProgress => -9998,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_platform_domain() {
        assert_eq!(AuthError::AuthenticationFailed.code(), -1);
        assert_eq!(AuthError::UserCancel.code(), -2);
        assert_eq!(AuthError::PasscodeNotSet.code(), -5);
        assert_eq!(AuthError::BiometryNotEnrolled.code(), -7);
        assert_eq!(AuthError::CompanionNotAvailable.code(), -11);
        assert_eq!(AuthError::NotInteractive.code(), -1004);
    }

    #[test]
    fn test_unknown_carries_detail() {
        let err = AuthError::Unknown("sensor dropped off the bus".to_string());
        assert_eq!(err.code(), 0);
        assert!(err.to_string().contains("sensor dropped off the bus"));
    }
}
