//! Policy model - which authentication mechanisms are acceptable for one attempt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authentication policy for a single attempt. Chosen once per attempt,
/// immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// Biometric authentication only.
    Biometrics,
    /// A paired companion device vouches for the user.
    Companion,
    /// Any device-owner credential, including the passcode fallback.
    DeviceOwner,
    /// Either enrolled biometrics or a paired companion device.
    BiometricsOrCompanion,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Biometrics => "biometrics",
            Policy::Companion => "companion",
            Policy::DeviceOwner => "device-owner",
            Policy::BiometricsOrCompanion => "biometrics-or-companion",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "biometrics" => Ok(Policy::Biometrics),
            "companion" => Ok(Policy::Companion),
            "device-owner" => Ok(Policy::DeviceOwner),
            "biometrics-or-companion" => Ok(Policy::BiometricsOrCompanion),
            other => Err(format!("Unknown authentication policy: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!("companion".parse::<Policy>().unwrap(), Policy::Companion);
        assert_eq!(
            "biometrics-or-companion".parse::<Policy>().unwrap(),
            Policy::BiometricsOrCompanion
        );
        assert!("password".parse::<Policy>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for policy in [
            Policy::Biometrics,
            Policy::Companion,
            Policy::DeviceOwner,
            Policy::BiometricsOrCompanion,
        ] {
            assert_eq!(policy.to_string().parse::<Policy>().unwrap(), policy);
        }
    }
}
