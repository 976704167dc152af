//! Services layer for the localauth demo.
//!
//! The authenticator boundary wraps the platform authentication service;
//! the flow drives one attempt end to end.

mod authenticator;
pub mod error;
mod flow;

pub use authenticator::{
    DeviceAuthenticator, DeviceProfile, EvaluationScript, MockAuthenticator, SimulatedDevice,
};
pub use error::AuthError;
pub use flow::{AuthFlow, Outcome};
