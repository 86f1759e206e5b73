use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// A log file larger than this is moved aside before a run appends to it (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

/// `whatif.log` -> `whatif.log.old`
fn backup_path(log_path: &Path) -> PathBuf {
    let mut name = log_path.as_os_str().to_owned();
    name.push(".old");
    PathBuf::from(name)
}

/// Move an oversized log to its backup path, replacing any earlier backup.
/// Returns whether the log was moved.
fn roll_over_if_oversized(log_path: &Path) -> std::io::Result<bool> {
    let size = match fs::metadata(log_path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if size <= MAX_LOG_SIZE {
        return Ok(false);
    }

    let backup = backup_path(log_path);
    match fs::remove_file(&backup) {
        Err(e) if e.kind() != ErrorKind::NotFound => return Err(e),
        _ => {}
    }
    fs::rename(log_path, &backup)?;
    Ok(true)
}

/// Initialize logging to stderr, or append to `log_file` when given.
///
/// Report output goes to stdout, so logs never interleave with it. A log file
/// over 5MB is moved to `<log_file>.old` and a fresh one started. The level
/// can be overridden through the `RUST_LOG` environment variable.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let mut rolled_over = false;
    let (writer, ansi) = match log_file {
        Some(log_path) => {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            match roll_over_if_oversized(log_path) {
                Ok(moved) => rolled_over = moved,
                Err(e) => eprintln!("Warning: Failed to roll over log file: {}", e),
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let default_filter = format!("whatif={level},whatif_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    match log_file {
        Some(path) if rolled_over => tracing::info!(
            "Logging initialized (log_path={}, previous log moved to {})",
            path.display(),
            backup_path(path).display()
        ),
        Some(path) => tracing::debug!("Logging initialized (log_path={})", path.display()),
        None => tracing::debug!("Logging initialized (stderr)"),
    }
    Ok(())
}
