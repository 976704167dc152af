use crate::models::Policy;
use crate::services::{DeviceProfile, EvaluationScript};
use localauth_core::config as core_config;
use localauth_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    /// Policy the trigger fires with. The reference setup authenticates
    /// through a paired companion device.
    pub policy: Policy,
    /// Profile of the simulated device backing the demo.
    pub device: DeviceProfile,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let config = AppConfig {
            common,
            service_name: get_env("SERVICE_NAME", Some("localauth"))?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")))?,
            policy: get_env("AUTH_POLICY", Some("companion"))?
                .parse()
                .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            device: DeviceProfile {
                biometry: get_env("DEVICE_BIOMETRY", Some("face"))?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                biometry_enrolled: get_bool_env("DEVICE_BIOMETRY_ENROLLED", true)?,
                passcode_set: get_bool_env("DEVICE_PASSCODE_SET", true)?,
                companion_paired: get_bool_env("DEVICE_COMPANION_PAIRED", true)?,
                companion_reachable: get_bool_env("DEVICE_COMPANION_REACHABLE", true)?,
                evaluation: get_env("DEVICE_EVALUATION", Some("approve"))?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                prompt_delay_ms: get_env("DEVICE_PROMPT_DELAY_MS", Some("0"))?
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        AppError::ConfigError(anyhow::anyhow!(e.to_string()))
                    })?,
            },
        };

        Ok(config)
    }
}

fn get_env(name: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => match default {
            Some(value) => Ok(value.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "Missing required environment variable: {}",
                name
            ))),
        },
    }
}

fn get_bool_env(name: &str, default: bool) -> Result<bool, AppError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value.parse().map_err(|_| {
            AppError::ConfigError(anyhow::anyhow!("Invalid boolean for {}: {}", name, value))
        }),
        _ => Ok(default),
    }
}
