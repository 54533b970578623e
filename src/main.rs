//! Host entry point
//!
//! Brackets the process with platform bring-up and teardown and reports
//! where the application content was found.

use std::process::ExitCode;

use nx_platform::app::{AssetLocator, LifecycleController};
use nx_platform::config::ShimConfig;
use nx_platform::domain::content::ContentSource;
use nx_platform::platform::{HeadlessBackend, HostQuery};

fn main() -> ExitCode {
    let config = match ShimConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut lifecycle = LifecycleController::new(HeadlessBackend::new(), config);
    let mut env = lifecycle.initialize();

    let location = AssetLocator::new(&env, lifecycle.config()).locate_content();
    let host = HostQuery::new(&env);

    let status = match &location.source {
        ContentSource::NotFound => {
            host.present_message(
                "No game",
                &format!(
                    "Place {} or {} next to {}",
                    lifecycle.config().packaged_name,
                    lifecycle.config().entry_script,
                    host.executable_path(),
                ),
            );
            ExitCode::FAILURE
        }
        source => {
            tracing::info!(?source, fused = location.fused, "application content located");
            ExitCode::SUCCESS
        }
    };

    lifecycle.shutdown(&mut env);
    status
}
