use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

/// Initializes the global logger.
///
/// The terminal UI owns stdout/stderr, so records are appended to `log_file`.
/// When `verbose` is `true`, debug messages are kept; otherwise info and
/// above. `RUST_LOG` overrides both.
pub fn init(verbose: bool, log_file: &Path) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            // Without a file, stay quiet rather than draw over the playfield.
            builder.filter_level(LevelFilter::Off);
        }
    }

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
