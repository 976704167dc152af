pub mod config;
pub mod models;
pub mod services;

use crate::config::AppConfig;
use crate::services::{AuthFlow, SimulatedDevice};
use std::sync::Arc;

/// Build the authentication flow over the simulated device described by the
/// configuration.
pub fn build_flow(config: &AppConfig) -> AuthFlow {
    let device = SimulatedDevice::new(config.device.clone());
    AuthFlow::new(Arc::new(device))
}
