//! Integration tests for the authentication request flow.
//!
//! Covers capability negotiation, reason selection, evaluation outcomes, and
//! the overlap guard.

mod common;

use common::flow_with;
use localauth::models::{BiometryType, Policy};
use localauth::services::{
    AuthError, AuthFlow, DeviceProfile, MockAuthenticator, Outcome, SimulatedDevice,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Capability check
// ============================================================================

#[tokio::test]
async fn denied_capability_skips_evaluation() {
    let (mock, flow) = flow_with(
        MockAuthenticator::new().with_capability(Err(AuthError::CompanionNotAvailable)),
    );

    let outcome = flow.attempt(Policy::Companion).await;

    assert_eq!(
        outcome,
        Outcome::CapabilityDenied(AuthError::CompanionNotAvailable)
    );
    assert_eq!(outcome.error().unwrap().code(), -11);
    assert_eq!(mock.check_calls.load(Ordering::SeqCst), 1);
    assert_eq!(mock.evaluate_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unstructured_capability_failure_is_still_reported() {
    let (mock, flow) = flow_with(
        MockAuthenticator::new()
            .with_capability(Err(AuthError::Unknown("no error object".to_string()))),
    );

    let outcome = flow.attempt(Policy::Biometrics).await;

    match outcome {
        Outcome::CapabilityDenied(AuthError::Unknown(detail)) => {
            assert_eq!(detail, "no error object");
        }
        other => panic!("Expected an unknown capability denial, got {:?}", other),
    }
    assert_eq!(mock.evaluate_calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Reason selection
// ============================================================================

#[tokio::test]
async fn success_reports_once_with_matching_reason() {
    let (mock, flow) = flow_with(MockAuthenticator::new().with_biometry(BiometryType::Face));

    let outcome = flow.attempt(Policy::Companion).await;

    assert!(outcome.is_authenticated());
    assert_eq!(mock.evaluate_calls.load(Ordering::SeqCst), 1);

    let reasons = mock.reasons.lock().unwrap();
    assert_eq!(reasons.len(), 1);
    assert!(reasons[0].contains("face"));
}

#[tokio::test]
async fn fingerprint_biometry_selects_fingerprint_reason() {
    let (mock, flow) = flow_with(MockAuthenticator::new().with_biometry(BiometryType::Fingerprint));

    let outcome = flow.attempt(Policy::Biometrics).await;

    assert!(outcome.is_authenticated());
    assert!(mock.reasons.lock().unwrap()[0].contains("fingerprint"));
}

#[tokio::test]
async fn unusable_biometry_after_passing_check_is_a_contract_violation() {
    let (mock, flow) = flow_with(MockAuthenticator::new().with_biometry(BiometryType::None));

    let outcome = flow.attempt(Policy::DeviceOwner).await;

    assert_eq!(
        outcome,
        Outcome::Failed(AuthError::ContractViolation(BiometryType::None))
    );
    // The prompt must never be shown for a contract violation.
    assert_eq!(mock.evaluate_calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Evaluation outcomes
// ============================================================================

#[tokio::test]
async fn user_cancel_preserves_the_specific_code() {
    let (_mock, flow) =
        flow_with(MockAuthenticator::new().with_evaluation(Err(AuthError::UserCancel)));

    let outcome = flow.attempt(Policy::Companion).await;

    assert_eq!(outcome, Outcome::Failed(AuthError::UserCancel));
    assert_eq!(outcome.error().unwrap().code(), -2);
}

#[tokio::test]
async fn rejected_evaluation_maps_to_authentication_failed() {
    let (_mock, flow) = flow_with(MockAuthenticator::new().with_evaluation(Ok(false)));

    let outcome = flow.attempt(Policy::Biometrics).await;

    assert_eq!(outcome, Outcome::Failed(AuthError::AuthenticationFailed));
}

#[tokio::test]
async fn lockout_surfaces_as_lockout() {
    let (_mock, flow) =
        flow_with(MockAuthenticator::new().with_evaluation(Err(AuthError::BiometryLockout)));

    let outcome = flow.attempt(Policy::Biometrics).await;

    assert_eq!(outcome, Outcome::Failed(AuthError::BiometryLockout));
    assert_eq!(outcome.error().unwrap().code(), -8);
}

// ============================================================================
// Independence and overlap
// ============================================================================

#[tokio::test]
async fn sequential_attempts_are_independent() {
    let (mock, flow) = flow_with(MockAuthenticator::new());

    let first = flow.attempt(Policy::Companion).await;
    assert!(first.is_authenticated());

    // Rescript the device between attempts; the second outcome must reflect
    // only the new script.
    *mock.evaluation.lock().unwrap() = Err(AuthError::UserCancel);
    let second = flow.attempt(Policy::Companion).await;

    assert_eq!(second, Outcome::Failed(AuthError::UserCancel));
    assert_eq!(mock.check_calls.load(Ordering::SeqCst), 2);
    assert_eq!(mock.evaluate_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn overlapping_attempt_is_refused_without_touching_the_device() {
    let (mock, flow) = flow_with(
        MockAuthenticator::new().with_evaluate_delay(Duration::from_millis(200)),
    );
    let flow = Arc::new(flow);

    let background = {
        let flow = flow.clone();
        tokio::spawn(async move { flow.attempt(Policy::Companion).await })
    };

    // Let the first attempt reach its suspension point.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let overlapping = flow.attempt(Policy::Companion).await;
    assert_eq!(overlapping, Outcome::Failed(AuthError::AttemptInProgress));

    // The in-flight attempt completes undisturbed, and the device saw only
    // one check and one evaluation.
    let first = background.await.unwrap();
    assert!(first.is_authenticated());
    assert_eq!(mock.check_calls.load(Ordering::SeqCst), 1);
    assert_eq!(mock.evaluate_calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Simulated device scenarios
// ============================================================================

#[tokio::test]
async fn companion_policy_with_unpaired_companion_shows_no_prompt() {
    let device = SimulatedDevice::new(DeviceProfile {
        companion_paired: false,
        ..DeviceProfile::default()
    });
    let flow = AuthFlow::new(Arc::new(device));

    let outcome = flow.attempt(Policy::Companion).await;

    assert_eq!(
        outcome,
        Outcome::CapabilityDenied(AuthError::CompanionNotAvailable)
    );
}

#[tokio::test]
async fn companion_policy_with_face_biometry_authenticates() {
    let device = SimulatedDevice::new(DeviceProfile::default());
    let flow = AuthFlow::new(Arc::new(device));

    let outcome = flow.attempt(Policy::Companion).await;

    assert!(outcome.is_authenticated());
}
