use hostguard_domain::config::LogFormat;
use hostguard_domain::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout is reserved for the JSON result.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let level = &config.level;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,hostguard={level},hostguard_application={level},hostguard_infrastructure={level},hostguard_jobs={level}"
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.compact().init(),
    }
}
