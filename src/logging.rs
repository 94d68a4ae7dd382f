use std::path::Path;

/// Map `-v` occurrences to a level. Warnings are always on.
pub fn level_from_verbosity(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Send log records to `log_file`. The terminal belongs to the UI, so there
/// is no stderr sink.
pub fn init_logger(min_level: log::LevelFilter, log_file: &Path) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(min_level)
        .chain(fern::log_file(log_file)?)
        .apply()?;

    Ok(())
}
