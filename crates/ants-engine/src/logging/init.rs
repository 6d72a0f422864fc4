use std::sync::Once;

/// Used when neither `LoggingConfig::env_filter` nor `RUST_LOG` is set.
///
/// wgpu's internal crates are chatty at `info`.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` uses `env_logger` directive syntax, e.g.
/// `"ants_engine=debug,wgpu_core=warn"`. It takes precedence over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Explicit filter, then `rust_log`, then `DEFAULT_FILTER`. Blank values are skipped.
fn resolve_filter(explicit: Option<String>, rust_log: Option<String>) -> String {
    explicit
        .into_iter()
        .chain(rust_log)
        .find(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` once; later calls do nothing.
///
/// If another logger is already installed (a host application, a test
/// harness), that one is kept.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        let installed = env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .try_init()
            .is_ok();

        if installed {
            log::debug!("logging initialized with filter `{filter}`");
        }
    });
}
