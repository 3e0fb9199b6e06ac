//! `r0n-restrict` binary entry point.
//!
//! Runs the restriction flow once against the current time:
//!
//! ```text
//! r0n-restrict <config.toml> <client-ip> [x-forwarded-for]
//! ```
//!
//! Prints `ALLOW` (exit 0) or `DENY: <message>` (exit 1). Usage errors and
//! unreadable configuration files exit with 2. Invalid schedules are logged
//! and the time restriction fails open.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use r0n_restrict::config::{BasicValidator, ConfigLoader};
use r0n_restrict::flow::{AuthDecision, AuthRequest, RestrictionFlow, X_FORWARDED_FOR};
use r0n_restrict::logging::init_logging;
use r0n_restrict::modules::audit::TracingAuditObserver;

const USAGE: &str = "usage: r0n-restrict <config.toml> <client-ip> [x-forwarded-for]";

fn run(config_path: &str, client_ip: &str, forwarded_for: Option<&str>) -> Result<bool> {
    let loader = ConfigLoader::new().with_validator(BasicValidator::new());
    let config = loader
        .read(config_path)
        .with_context(|| format!("loading {config_path}"))?;

    // A subscriber may already be installed by an embedding process.
    let _ = init_logging(&config.logging);

    // Invalid schedules fail open at evaluation.
    if let Err(e) = loader.validate(&config) {
        warn!(config = %config_path, error = %e, "Configuration has errors, affected restrictions fail open");
    }

    let flow = RestrictionFlow::from_config(&config, Arc::new(TracingAuditObserver::new()));

    let mut request = AuthRequest::new().with_remote_addr(client_ip);
    if let Some(value) = forwarded_for {
        request = request.with_header(X_FORWARDED_FOR, value);
    }

    let decision = flow.check(&request);
    debug!(
        metrics = %flow.stats().snapshot().to_prometheus("r0n_restrict"),
        "restriction check complete"
    );

    match decision {
        AuthDecision::Success => {
            println!("ALLOW");
            Ok(true)
        },
        AuthDecision::Failure(failure) => {
            println!("DENY: {}", failure.message);
            Ok(false)
        },
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (config_path, client_ip, forwarded_for) = match args.as_slice() {
        [config, ip] => (config, ip, None),
        [config, ip, forwarded] => (config, ip, Some(forwarded.as_str())),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        },
    };

    match run(config_path, client_ip, forwarded_for) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(content: &str) -> (tempfile::TempDir, String) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("restrict.toml");
        std::fs::write(&path, content).unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn test_unknown_timezone_fails_open() {
        let (_dir, path) = write_config(
            "[time_restriction]\ntimezone = \"Moon/Tranquility\"\nstart_time = \"09:00\"\nend_time = \"09:01\"\n",
        );
        assert!(run(&path, "10.0.0.1", None).unwrap());
    }

    #[test]
    fn test_ip_denial() {
        let (_dir, path) = write_config("[ip_restriction]\nrules = [\"-10.0.0.0/8\"]\n");
        assert!(!run(&path, "10.0.0.1", None).unwrap());
        assert!(run(&path, "192.168.1.1", None).unwrap());
        assert!(!run(&path, "192.168.1.1", Some("10.1.2.3, 192.168.1.1")).unwrap());
    }

    #[test]
    fn test_missing_config_is_an_error() {
        assert!(run("/nonexistent/restrict.toml", "10.0.0.1", None).is_err());
    }
}
