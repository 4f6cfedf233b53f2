//! Minimal stderr logger behind the `log` facade.

use std::io::Write as _;

use log::{Level, LevelFilter, Log, Metadata, Record};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[m";

struct StderrLogger {
    color: bool,
}

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true // level filtering happens via log::set_max_level
    }

    fn log(&self, record: &Record) {
        let color = match record.level() {
            Level::Error => RED,
            Level::Warn => YELLOW,
            _ => "",
        };
        let mut err = std::io::stderr().lock();
        if self.color && !color.is_empty() {
            let _ = writeln!(err, "{color}{}: {RESET}{}", record.level(), record.args());
        } else {
            let _ = writeln!(err, "{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Map the CLI's level names onto the facade's five levels. `notice` is
/// the quiet default (warnings and errors); `info` adds per-test
/// summaries; `trace` and `debug` both open up the per-cycle logs.
pub fn level_from_name(name: &str) -> Option<LevelFilter> {
    Some(match name {
        "none" => LevelFilter::Off,
        "err" | "error" => LevelFilter::Error,
        "warn" | "notice" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "trace" => LevelFilter::Debug,
        "debug" => LevelFilter::Trace,
        _ => return None,
    })
}

/// Install the logger once, with the given filter and color choice.
pub fn install(filter: LevelFilter, color: bool) {
    let logger = Box::leak(Box::new(StderrLogger { color }));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_resolve() {
        assert_eq!(level_from_name("none"), Some(LevelFilter::Off));
        assert_eq!(level_from_name("err"), Some(LevelFilter::Error));
        assert_eq!(level_from_name("error"), Some(LevelFilter::Error));
        assert_eq!(level_from_name("notice"), Some(LevelFilter::Warn));
        assert_eq!(level_from_name("info"), Some(LevelFilter::Info));
        assert_eq!(level_from_name("debug"), Some(LevelFilter::Trace));
        assert_eq!(level_from_name("loud"), None);
    }
}
