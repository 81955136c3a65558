use log::LevelFilter;

/// Routes [log] records to the browser's developer console through `console_log`.
///
/// Only the first call installs the console logger; later calls, and calls made after the host
/// installed a logger of its own, only adjust the maximum level. [LevelFilter::Off] silences
/// logging without installing anything.
pub fn init_logging(level: LevelFilter) {
    if let Some(level) = level.to_level() {
        if console_log::init_with_level(level).is_ok() {
            log::debug!("console logging initialized");
        }
    }

    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_only_sets_max_level() {
        init_logging(LevelFilter::Off);

        assert_eq!(log::max_level(), LevelFilter::Off);
        assert!(!log::log_enabled!(log::Level::Error));
    }
}
