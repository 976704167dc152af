//! Test helpers for the authentication flow integration tests.

#![allow(dead_code)]

use localauth::services::{AuthFlow, MockAuthenticator};
use std::sync::Arc;

/// Wrap a scripted authenticator in a flow, keeping a handle to the mock so
/// tests can inspect call counts and recorded reasons.
pub fn flow_with(mock: MockAuthenticator) -> (Arc<MockAuthenticator>, AuthFlow) {
    let mock = Arc::new(mock);
    let flow = AuthFlow::new(mock.clone());
    (mock, flow)
}
