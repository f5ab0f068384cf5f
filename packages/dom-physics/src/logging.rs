//! `log` sink: browser console on wasm32, stderr elsewhere.

use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger (first call wins) and set the max level.
pub fn init(level: LevelFilter) {
    // A logger installed by the embedding app takes precedence.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[dom-physics] {} {}: {}", record.level(), record.target(), record.args());
        write_line(record.level(), &line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: Level, line: &str) {
    eprintln!("{line}");
}
