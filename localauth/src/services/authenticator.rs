//! Device authenticator boundary.
//!
//! The OS biometric/companion authentication service is an external
//! capability, consumed through the `DeviceAuthenticator` trait so the flow
//! can be exercised against a test double. `SimulatedDevice` is the
//! configuration-driven stand-in that backs the demo binary.

use crate::models::{BiometryType, Policy};
use crate::services::error::AuthError;
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[async_trait]
pub trait DeviceAuthenticator: Send + Sync {
    /// Fast, local, non-suspending check for whether `policy` can currently
    /// be evaluated. No user interaction happens here.
    fn can_evaluate(&self, policy: Policy) -> Result<(), AuthError>;

    /// Biometric capability class of the device. Only meaningful after
    /// `can_evaluate` has completed at least once; before that the default
    /// (`BiometryType::None`) is returned.
    fn biometry_type(&self) -> BiometryType;

    /// Evaluate `policy`, showing `reason` alongside the OS prompt. The sole
    /// suspension point of an attempt; may wait for an indeterminate,
    /// user-paced duration. `Ok(false)` means the credentials were rejected
    /// without a more specific error.
    async fn evaluate(&self, policy: Policy, reason: &str) -> Result<bool, AuthError>;
}

/// What the simulated device does when the evaluation prompt is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationScript {
    Approve,
    Reject,
    UserCancel,
    UserFallback,
    SystemCancel,
    Lockout,
    NotInteractive,
}

impl FromStr for EvaluationScript {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(EvaluationScript::Approve),
            "reject" => Ok(EvaluationScript::Reject),
            "user-cancel" => Ok(EvaluationScript::UserCancel),
            "user-fallback" => Ok(EvaluationScript::UserFallback),
            "system-cancel" => Ok(EvaluationScript::SystemCancel),
            "lockout" => Ok(EvaluationScript::Lockout),
            "not-interactive" => Ok(EvaluationScript::NotInteractive),
            other => Err(format!("Unknown evaluation script: {}", other)),
        }
    }
}

/// Hardware and enrollment profile of the simulated device.
#[derive(Debug, Clone)]
pub struct DeviceProfile {
    /// Biometric sensor present on the device.
    pub biometry: BiometryType,
    /// Whether the user has enrolled identities for that sensor.
    pub biometry_enrolled: bool,
    pub passcode_set: bool,
    pub companion_paired: bool,
    pub companion_reachable: bool,
    /// How the user answers the evaluation prompt.
    pub evaluation: EvaluationScript,
    /// Artificial prompt latency, to mimic the user-paced wait.
    pub prompt_delay_ms: u64,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            biometry: BiometryType::Face,
            biometry_enrolled: true,
            passcode_set: true,
            companion_paired: true,
            companion_reachable: true,
            evaluation: EvaluationScript::Approve,
            prompt_delay_ms: 0,
        }
    }
}

/// Config-driven stand-in for the OS authentication service.
pub struct SimulatedDevice {
    profile: DeviceProfile,
    // biometry_type is undefined until a capability check has completed
    checked: AtomicBool,
}

impl SimulatedDevice {
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            profile,
            checked: AtomicBool::new(false),
        }
    }

    fn check_biometrics(&self) -> Result<(), AuthError> {
        if self.profile.biometry == BiometryType::None {
            return Err(AuthError::BiometryNotAvailable);
        }
        if !self.profile.biometry_enrolled {
            return Err(AuthError::BiometryNotEnrolled);
        }
        Ok(())
    }

    fn check_companion(&self) -> Result<(), AuthError> {
        if !self.profile.companion_paired || !self.profile.companion_reachable {
            return Err(AuthError::CompanionNotAvailable);
        }
        Ok(())
    }
}

#[async_trait]
impl DeviceAuthenticator for SimulatedDevice {
    fn can_evaluate(&self, policy: Policy) -> Result<(), AuthError> {
        // The classification becomes readable once the check completes,
        // whether or not the policy was accepted.
        self.checked.store(true, Ordering::SeqCst);

        // Every policy requires a device passcode as the base credential.
        if !self.profile.passcode_set {
            return Err(AuthError::PasscodeNotSet);
        }

        match policy {
            Policy::DeviceOwner => Ok(()),
            Policy::Biometrics => self.check_biometrics(),
            Policy::Companion => self.check_companion(),
            Policy::BiometricsOrCompanion => {
                self.check_biometrics().or_else(|_| self.check_companion())
            }
        }
    }

    fn biometry_type(&self) -> BiometryType {
        if !self.checked.load(Ordering::SeqCst) {
            return BiometryType::None;
        }
        self.profile.biometry
    }

    async fn evaluate(&self, policy: Policy, reason: &str) -> Result<bool, AuthError> {
        tracing::debug!(policy = %policy, reason = %reason, "Simulated prompt shown");
        if self.profile.prompt_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.profile.prompt_delay_ms)).await;
        }
        match self.profile.evaluation {
            EvaluationScript::Approve => Ok(true),
            EvaluationScript::Reject => Ok(false),
            EvaluationScript::UserCancel => Err(AuthError::UserCancel),
            EvaluationScript::UserFallback => Err(AuthError::UserFallback),
            EvaluationScript::SystemCancel => Err(AuthError::SystemCancel),
            EvaluationScript::Lockout => Err(AuthError::BiometryLockout),
            EvaluationScript::NotInteractive => Err(AuthError::NotInteractive),
        }
    }
}

/// Scripted authenticator for tests. Records calls so tests can assert that
/// evaluation is skipped when the capability check refuses a policy.
pub struct MockAuthenticator {
    pub capability: Mutex<Result<(), AuthError>>,
    pub biometry: Mutex<BiometryType>,
    pub evaluation: Mutex<Result<bool, AuthError>>,
    pub evaluate_delay: Mutex<Option<Duration>>,
    pub check_calls: AtomicUsize,
    pub evaluate_calls: AtomicUsize,
    pub reasons: Mutex<Vec<String>>,
}

impl MockAuthenticator {
    pub fn new() -> Self {
        Self {
            capability: Mutex::new(Ok(())),
            biometry: Mutex::new(BiometryType::Face),
            evaluation: Mutex::new(Ok(true)),
            evaluate_delay: Mutex::new(None),
            check_calls: AtomicUsize::new(0),
            evaluate_calls: AtomicUsize::new(0),
            reasons: Mutex::new(Vec::new()),
        }
    }

    pub fn with_capability(self, result: Result<(), AuthError>) -> Self {
        *self.capability.lock().unwrap() = result;
        self
    }

    pub fn with_biometry(self, biometry: BiometryType) -> Self {
        *self.biometry.lock().unwrap() = biometry;
        self
    }

    pub fn with_evaluation(self, result: Result<bool, AuthError>) -> Self {
        *self.evaluation.lock().unwrap() = result;
        self
    }

    pub fn with_evaluate_delay(self, delay: Duration) -> Self {
        *self.evaluate_delay.lock().unwrap() = Some(delay);
        self
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceAuthenticator for MockAuthenticator {
    fn can_evaluate(&self, _policy: Policy) -> Result<(), AuthError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        self.capability.lock().unwrap().clone()
    }

    fn biometry_type(&self) -> BiometryType {
        *self.biometry.lock().unwrap()
    }

    async fn evaluate(&self, _policy: Policy, reason: &str) -> Result<bool, AuthError> {
        self.evaluate_calls.fetch_add(1, Ordering::SeqCst);
        self.reasons.lock().unwrap().push(reason.to_string());
        let delay = *self.evaluate_delay.lock().unwrap();
        let result = self.evaluation.lock().unwrap().clone();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }
}
