//! Main application orchestration and execution

use crate::{
    cli::Cli,
    config::{load_config, display_config_summary, EnvManager},
    dns::DnsQueryExecutor,
    error::Result,
    executor::BenchmarkRunner,
    loader,
    logging::LoggerFactory,
    models::{BenchmarkReport, Config},
    output::{ConsoleProgress, OutputCoordinator, OutputFormatterFactory, ResultWriter},
    log_debug, log_info, log_warn,
};

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
}

impl App {
    /// Create a new application instance, resolving configuration from all layers
    pub fn new(cli: Cli) -> Result<Self> {
        let config = load_config(cli)?;
        Ok(Self { config })
    }

    /// Create an application from an already resolved configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the benchmark end to end and return the report
    pub async fn run(&self) -> Result<BenchmarkReport> {
        let config = &self.config;
        let factory = LoggerFactory::new(config.clone());
        let logger = factory.create_logger("app").await;

        log_info!(logger, "{} v{} starting (session {})", crate::PKG_NAME, crate::VERSION, factory.session_id());
        log_debug!(logger, "Configuration:\n{}", display_config_summary(config));

        for warning in EnvManager::validate_current_env() {
            log_warn!(logger, "{}", warning);
        }

        let servers = loader::load_servers(&config.servers_file)?;
        let domains = loader::load_domains(&config.domains_file)?;
        log_info!(logger, "Loaded {} servers and {} domains", servers.len(), domains.len());

        let run_config = config.run_config();
        let bench_logger = factory.create_bench_logger().await;
        let executor = DnsQueryExecutor::with_logger(bench_logger.clone());
        let runner = BenchmarkRunner::with_logger(executor, run_config, bench_logger);

        let formatter = OutputFormatterFactory::create_formatter(config.enable_color, config.verbose);
        println!(
            "Benchmarking {} servers against {} domains ({} runs, {}ms timeout)...",
            servers.len(),
            domains.len(),
            run_config.runs,
            run_config.timeout_ms
        );

        let report = {
            let progress = ConsoleProgress::new(formatter.as_ref());
            runner.run_with_observer(&servers, &domains, &progress).await?
        };

        log_info!(
            logger,
            "Benchmark finished: {} ranked, {} abandoned, {} samples",
            report.results.len(),
            report.exceeded.len(),
            report.total_samples()
        );

        let coordinator = OutputCoordinator::new(formatter, config.top_n);
        println!();
        println!("{}", coordinator.display_report(&report, &run_config, servers.len(), domains.len())?);

        if config.write_results {
            let writer = ResultWriter::new(&config.output_dir);
            let paths = writer.write_all(&report, run_config, config.top_n)?;
            println!();
            for path in paths {
                println!("{}", coordinator.formatter().format_success(&format!("Results written to {}", path.display()))?);
            }
        }

        if report.results.is_empty() {
            println!();
            println!("{}", coordinator.formatter().format_warning("No server answered any query within the timeout")?);
        }

        Ok(report)
    }
}
