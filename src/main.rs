mod cli;

use cli::Args;
use dependency_overrider::adapters::outbound::console::ConsoleProgressReporter;
use dependency_overrider::adapters::outbound::dotnet::DotnetCli;
use dependency_overrider::application::dto::ResolutionRequest;
use dependency_overrider::application::use_cases::ResolveOverridesUseCase;
use dependency_overrider::config::{default_config_path, load_config};
use dependency_overrider::ports::outbound::PackageManagerGateway;
use dependency_overrider::shared::error::ExitCode;
use dependency_overrider::shared::Result;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // The package manager must be callable before anything else happens
    let gateway = DotnetCli::new()
        .with_program(&args.dotnet)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    gateway.probe().await?;

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config = load_config(&config_path)?;

    let use_case = ResolveOverridesUseCase::new(config, gateway, ConsoleProgressReporter::new())
        .with_cancel_flag(install_cancel_handler());

    let request = ResolutionRequest::new(args.no_restore, args.dry_run);
    use_case.execute(request).await;

    Ok(())
}

/// Diagnostic logging to stderr, filtered by RUST_LOG (errors only by default)
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Turns Ctrl-C into a request to stop after the current target
fn install_cancel_handler() -> Arc<AtomicBool> {
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel_flag);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n⚠️  Interrupt received, stopping after the current target...");
            handler_flag.store(true, Ordering::SeqCst);
        }
    });
    cancel_flag
}
