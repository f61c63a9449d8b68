//! Logger setup for the command-line tool

use std::env;
use std::io::Write;

use chrono::Utc;
use env_logger::Builder;
use log::LevelFilter;

/// Install `env_logger`, writing to stderr.
///
/// `RUST_LOG` wins when it is set; otherwise the level is `Info`, or `Debug`
/// when `verbose` is true.
pub fn init_logger(verbose: bool) {
    let mut builder = Builder::new();

    builder.format(|formatter, record| {
        writeln!(
            formatter,
            "{} [{}] ({}): {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S %z"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Ok(var) = env::var("RUST_LOG") {
        builder.parse_filters(&var);
    } else {
        builder.filter(None, default_level(verbose));
    }

    builder.init();
}

fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false), LevelFilter::Info);
        assert_eq!(default_level(true), LevelFilter::Debug);
    }
}
