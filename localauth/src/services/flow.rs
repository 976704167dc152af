//! Authentication request flow.
//!
//! One logical task per attempt: capability negotiation, reason selection,
//! asynchronous policy evaluation, outcome reporting. Every failure path is
//! caught and reported here; nothing propagates further up.

use crate::models::{AuthAttempt, Policy};
use crate::services::authenticator::DeviceAuthenticator;
use crate::services::error::AuthError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Terminal result of one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The evaluation resolved to a successful authentication.
    Authenticated,
    /// The capability check refused the policy; no prompt was shown.
    CapabilityDenied(AuthError),
    /// The evaluation ran and failed.
    Failed(AuthError),
}

impl Outcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Outcome::Authenticated)
    }

    pub fn error(&self) -> Option<&AuthError> {
        match self {
            Outcome::Authenticated => None,
            Outcome::CapabilityDenied(err) | Outcome::Failed(err) => Some(err),
        }
    }
}

pub struct AuthFlow {
    authenticator: Arc<dyn DeviceAuthenticator>,
    // Overlapping attempts are not coordinated by the OS boundary, so the
    // flow itself refuses a second attempt while one is outstanding.
    in_flight: AtomicBool,
}

impl AuthFlow {
    pub fn new(authenticator: Arc<dyn DeviceAuthenticator>) -> Self {
        Self {
            authenticator,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one authentication attempt for `policy`. Never returns an error;
    /// every failure is folded into the `Outcome`.
    pub async fn attempt(&self, policy: Policy) -> Outcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!(policy = %policy, "Rejecting attempt: another attempt is in flight");
            return Outcome::Failed(AuthError::AttemptInProgress);
        }

        let outcome = self.run(policy).await;
        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run(&self, policy: Policy) -> Outcome {
        let attempt = AuthAttempt::new(policy);
        tracing::info!(
            attempt_id = %attempt.id,
            policy = %policy,
            "Starting authentication attempt"
        );

        // Fast local check; evaluation must never run when this refuses.
        if let Err(err) = self.authenticator.can_evaluate(policy) {
            match &err {
                AuthError::Unknown(detail) => tracing::error!(
                    attempt_id = %attempt.id,
                    detail = %detail,
                    "Capability check failed without a structured error"
                ),
                _ => tracing::warn!(
                    attempt_id = %attempt.id,
                    code = err.code(),
                    error = %err,
                    "Policy cannot be evaluated on this device"
                ),
            }
            return Outcome::CapabilityDenied(err);
        }

        // Valid only now that the capability check has completed.
        let biometry = self.authenticator.biometry_type();
        let reason = match biometry.sign_in_reason() {
            Some(reason) => reason,
            None => {
                // A successful check implies one of the known classes is
                // present; disagreement is a programming-logic error, not a
                // user-facing failure.
                let err = AuthError::ContractViolation(biometry);
                tracing::error!(
                    attempt_id = %attempt.id,
                    biometry = %biometry,
                    "Capability check and biometry classification disagree"
                );
                return Outcome::Failed(err);
            }
        };

        tracing::debug!(
            attempt_id = %attempt.id,
            reason = %reason,
            "Requesting policy evaluation"
        );

        // Sole suspension point; the OS prompt is user-paced and any timeout
        // is enforced by the OS, surfacing as a structured error.
        match self.authenticator.evaluate(policy, reason).await {
            Ok(true) => {
                tracing::info!(
                    attempt_id = %attempt.id,
                    elapsed_ms = attempt.elapsed_ms(),
                    "Authentication succeeded"
                );
                Outcome::Authenticated
            }
            Ok(false) => {
                tracing::warn!(
                    attempt_id = %attempt.id,
                    elapsed_ms = attempt.elapsed_ms(),
                    "Authentication was rejected"
                );
                Outcome::Failed(AuthError::AuthenticationFailed)
            }
            Err(err) => {
                tracing::warn!(
                    attempt_id = %attempt.id,
                    code = err.code(),
                    error = %err,
                    elapsed_ms = attempt.elapsed_ms(),
                    "Authentication failed"
                );
                Outcome::Failed(err)
            }
        }
    }
}
