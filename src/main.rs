//! DNS Latency Benchmark - Main CLI Application
//!
//! Measures how fast a list of DNS servers resolves a list of domains and
//! ranks them by average latency.

use clap::Parser;
use dns_latency_bench::{
    app::App,
    cli::Cli,
    error::{AppError, ErrorReporter, Result},
};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        eprintln!("This is a bug. Please report it along with the command line you used.");
        process::exit(99);
    }));

    let cli = Cli::parse();

    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose || cli.debug);

    if let Err(e) = run_application(cli).await {
        reporter.report_error(&e);
        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        eprintln!("{} {}", dns_latency_bench::PKG_NAME, dns_latency_bench::LONG_VERSION);
        if let Some(commit) = dns_latency_bench::GIT_COMMIT {
            eprintln!("Commit: {}", commit);
        }
        eprintln!("Debug mode enabled");
    }

    App::new(cli)?.run().await?;
    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file and DNSBENCH_* environment variables");
            eprintln!("  - Runs must be 1-1000, timeout 1-60000 ms");
            eprintln!("  - Max timeouts and --top must be at least 1");
        }
        AppError::Validation(_) | AppError::Parse(_) => {
            eprintln!();
            eprintln!("Input file help:");
            eprintln!("  - Servers: a JSON array like [{{\"Name\": \"Cloudflare\", \"Address\": \"1.1.1.1\"}}]");
            eprintln!("  - Domains: one domain per line, '#' starts a comment");
        }
        AppError::Io(_) => {
            eprintln!();
            eprintln!("File help:");
            eprintln!("  - Use --servers and --domains to point at your input files");
            eprintln!("  - Use --output-dir to choose a writable directory, or --no-save");
        }
        _ => {}
    }
}
