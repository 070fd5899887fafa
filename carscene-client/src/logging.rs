//! Logger set-up: timestamped lines to stdout and to `<data_dir>/carscene/carscene.log`.

use std::path::Path;

/// Installs the global logger. The log file is optional; if it cannot be opened the
/// dispatch still writes to stdout.
pub fn init(level: log::LevelFilter, data_dir: &Path) -> Result<(), String> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    let log_file = std::fs::create_dir_all(data_dir)
        .and_then(|_| fern::log_file(data_dir.join("carscene.log")));
    let file_error = match log_file {
        Ok(file) => {
            dispatch = dispatch.chain(file);
            None
        }
        Err(e) => Some(e),
    };

    dispatch.apply().map_err(|e| e.to_string())?;

    if let Some(e) = file_error {
        log::warn!("Logging to stdout only, cannot open log file: {}", e);
    }
    Ok(())
}
