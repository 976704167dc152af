use localauth::{build_flow, config::AppConfig, services::Outcome};
use localauth_core::error::AppError;
use localauth_core::observability::init_tracing;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = AppConfig::from_env()?;

    init_tracing(&config.service_name, &config.common.log_level);

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        policy = %config.policy,
        "Starting local authentication demo"
    );

    let flow = build_flow(&config);

    // The "button": each entered line is one press. Attempts run one at a
    // time; the loop is sequential, so presses never overlap.
    println!(
        "Press Enter to request authentication with the '{}' policy ('quit' to exit).",
        config.policy
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "quit" {
            break;
        }

        match flow.attempt(config.policy).await {
            Outcome::Authenticated => println!("Authentication succeeded."),
            Outcome::CapabilityDenied(err) => {
                println!("Cannot evaluate policy: {} (code {})", err, err.code())
            }
            Outcome::Failed(err) => {
                println!("Authentication failed: {} (code {})", err, err.code())
            }
        }
        println!("Press Enter to try again ('quit' to exit).");
    }

    tracing::info!("Demo shutdown complete");
    Ok(())
}
