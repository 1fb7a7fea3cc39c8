//! Logging bridge for the icon-classes binary.
//!
//! Routes every `log::info!()`, `log::warn!()` etc. from this crate and the
//! engine crates to stderr as timestamped lines, keeping stdout for results.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the settings
//! file (applied after settings load through `apply_config_level`).

use icon_classes_config::LogLevel;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Set when the level came from the CLI or `RUST_LOG`; the settings file
/// may not override it then.
static LEVEL_FIXED: AtomicBool = AtomicBool::new(false);

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

struct LogBridge {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        let mut sink = self.sink.lock();
        let _ = sink.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Level named by `RUST_LOG`, when it is a plain level name.
fn level_from_env() -> Option<LogLevel> {
    let value = std::env::var("RUST_LOG").ok()?;
    // Accept "debug" as well as "icon_classes=debug"; module filters are not supported.
    let level = value.rsplit('=').next().unwrap_or(&value);
    level.parse().ok()
}

/// Install the bridge as the global logger.
///
/// Safe to call more than once; only the first call installs the logger, but
/// every call updates the level.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let chosen = cli_level.or_else(level_from_env);
    LEVEL_FIXED.store(chosen.is_some(), Ordering::Relaxed);

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        sink: Mutex::new(Box::new(std::io::stderr())),
    });
    // Fails only if another logger was installed first, which is fine.
    let _ = log::set_logger(bridge);

    let level = chosen.unwrap_or_else(icon_classes_config::defaults::log_level);
    log::set_max_level(level.to_level_filter());
}

/// Apply the settings file's level unless the CLI or environment chose one.
pub fn apply_config_level(level: LogLevel) {
    if LEVEL_FIXED.load(Ordering::Relaxed) {
        return;
    }
    log::set_max_level(level.to_level_filter());
}
