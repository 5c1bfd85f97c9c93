//! Unrecoverable initialization errors.
//!
//! Window, GPU and shader setup failures are programming or environment
//! errors for a demo; there is nothing to retry. They end the process here.

/// Logs `err` with its full context chain and terminates the process with
/// exit status 1.
pub fn abort_init(err: anyhow::Error) -> ! {
    log::error!("unrecoverable initialization error: {err:#}");
    // The logger may not be up yet if logging itself was never initialized.
    if !log::log_enabled!(log::Level::Error) {
        eprintln!("unrecoverable initialization error: {err:#}");
    }
    std::process::exit(1)
}
