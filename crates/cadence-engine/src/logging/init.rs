use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` sets one: driver
/// start/stop and failures, wgpu warnings only.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Per-frame directives: executed frames, viewport reconfiguration and
/// skipped surface frames.
const FRAME_TRACE: &str = "cadence_engine::scheduler=debug,cadence_engine::viewport=debug,cadence_engine::device=debug";

/// Logger configuration for native hosts.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter syntax. Overrides `RUST_LOG`.
    pub filter: Option<String>,

    /// Appends debug directives for the frame loop to whichever filter wins.
    pub trace_frames: bool,

    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            trace_frames: false,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Filter string in effect given the `RUST_LOG` value `env`.
    fn resolve_filter(&self, env: Option<String>) -> String {
        let base = self
            .filter
            .clone()
            .or(env)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        if self.trace_frames {
            format!("{base},{FRAME_TRACE}")
        } else {
            base
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
///
/// Timestamps carry milliseconds so frame pacing is readable from the log.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolve_filter(std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format_timestamp_millis()
            .init();

        log::debug!("logging initialized ({filter})");
    });
}
