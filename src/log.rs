use std::path::Path;

use tracing_subscriber::filter::LevelFilter;

/// Installs the global subscriber: pretty stdout at `level` and, if `log_dir`
/// is given, a plain file log next to it. Records from the `log` crate are
/// forwarded as well.
pub fn init_native_log(level: LevelFilter, log_dir: Option<&Path>) {
    use tracing_subscriber::prelude::*;

    let stdout_log = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .pretty()
        .with_filter(level);

    let file_log = log_dir.and_then(create_log_file).map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .with_filter(level)
    });

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(file_log)
        .init();
}

fn create_log_file(dir: &Path) -> Option<std::fs::File> {
    std::fs::create_dir_all(dir).ok()?;
    let file_name = format!("{}.log", chrono::Local::now().format("%Y%m%dT%H%M%S"));
    std::fs::File::create(dir.join(file_name)).ok()
}
