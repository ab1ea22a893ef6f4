//! Logging helpers
//!
//! The library only emits through the `log` facade; binaries pick the
//! backend. `envkit` uses `env_logger`.

/// Initialize the global logger
///
/// `RUST_LOG` takes precedence when set; otherwise `level` is used.
///
/// # Parameters
///
/// * `level` - Log level filter, e.g. `error`, `info`, `debug`
pub fn init_logger(level: &str) {
    let env = env_logger::Env::default()
        .filter_or("RUST_LOG", level);

    // a second call (tests, embedding) keeps the first logger
    let _ = env_logger::Builder::from_env(env).try_init();
}
