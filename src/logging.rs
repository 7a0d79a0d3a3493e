//! Logging bootstrap.
//!
//! Logs go to stderr through `flexi_logger`. Initialization happens at most
//! once per process and never panics; a failed start leaves the `log` macros
//! as no-ops.

use std::sync::OnceLock;

use flexi_logger::{Logger, LoggerHandle};
use log::debug;

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Start the stderr logger at `level`. Repeated calls are no-ops.
pub fn init_logging(level: &str) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let level = normalize_level(level)?;
    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;
    let _ = LOGGER.set(handle);

    debug!(
        "event=logging_init module=core status=ok level={level} version={}",
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok("off"),
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected off|trace|debug|info|warn|error"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_level_accepts_known_levels() {
        assert_eq!(normalize_level(" WARNING ").unwrap(), "warn");
        assert_eq!(normalize_level("debug").unwrap(), "debug");
        assert!(normalize_level("verbose").is_err());
    }
}
