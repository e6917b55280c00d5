// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::io::Write;

use log::LevelFilter;

pub struct Logger;

impl Logger {
    /// Installs `env_logger` as the global logger. `RUST_LOG` still
    /// overrides the level chosen here.
    pub fn initialize(verbose: bool) {
        let level = if verbose { LevelFilter::Trace } else { LevelFilter::Warn };

        let result = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format(|buf, record| {
                writeln!(buf, "[{}] {}: {}", record.level(), record.file().unwrap_or_default(), record.args())
            })
            .try_init();

        if let Err(e) = result {
            eprintln!("Could not install the logger: {e}");
            return;
        }

        log::debug!("Logger is initialized");
    }
}
