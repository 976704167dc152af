//! Biometry model - the class of biometric sensor detected on the device.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Detected biometric capability class.
///
/// Only meaningful after a capability check has completed on the
/// authenticator; before that the reported value is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BiometryType {
    #[default]
    None,
    Face,
    Iris,
    Fingerprint,
}

impl BiometryType {
    /// Localized justification string shown alongside the OS prompt.
    /// `None` has no usable sign-in text.
    pub fn sign_in_reason(&self) -> Option<&'static str> {
        match self {
            BiometryType::Face => Some("Sign in with face recognition"),
            BiometryType::Iris => Some("Sign in with iris recognition"),
            BiometryType::Fingerprint => Some("Sign in with your fingerprint"),
            BiometryType::None => None,
        }
    }
}

impl fmt::Display for BiometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BiometryType::None => "none",
            BiometryType::Face => "face",
            BiometryType::Iris => "iris",
            BiometryType::Fingerprint => "fingerprint",
        };
        f.write_str(s)
    }
}

impl FromStr for BiometryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(BiometryType::None),
            "face" => Ok(BiometryType::Face),
            "iris" => Ok(BiometryType::Iris),
            "fingerprint" => Ok(BiometryType::Fingerprint),
            other => Err(format!("Unknown biometry type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(BiometryType::default(), BiometryType::None);
    }

    #[test]
    fn test_sign_in_reason() {
        assert!(BiometryType::Face.sign_in_reason().unwrap().contains("face"));
        assert!(BiometryType::Iris.sign_in_reason().unwrap().contains("iris"));
        assert!(BiometryType::Fingerprint
            .sign_in_reason()
            .unwrap()
            .contains("fingerprint"));
        assert!(BiometryType::None.sign_in_reason().is_none());
    }

    #[test]
    fn test_parse_biometry() {
        assert_eq!("face".parse::<BiometryType>().unwrap(), BiometryType::Face);
        assert!("voice".parse::<BiometryType>().is_err());
    }
}
