//! Common functionality shared by all CLI sub commands.

pub mod io;

use clap::Parser;

/// Commonly used command line arguments, flattened into every sub command.
#[derive(Parser, Debug, Clone)]
pub struct Args {
    /// Verbosity of the program.
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

/// Install a `tracing` subscriber whose level follows `--verbose`/`--quiet`.
pub fn init_tracing(args: &Args) {
    let level = match args.verbose.log_level() {
        Some(log::Level::Error) => tracing::Level::ERROR,
        Some(log::Level::Warn) => tracing::Level::WARN,
        Some(log::Level::Info) => tracing::Level::INFO,
        Some(log::Level::Debug) => tracing::Level::DEBUG,
        Some(log::Level::Trace) => tracing::Level::TRACE,
        None => tracing::Level::INFO,
    };
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .compact()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Print the current memory resident set size, best-effort.
pub fn trace_rss_now() {
    if let Ok(me) = procfs::process::Process::myself() {
        if let Ok(stat) = me.stat() {
            let bytes = stat.rss as u128 * procfs::page_size() as u128;
            if let Some(byte) = byte_unit::Byte::from_u128(bytes) {
                tracing::trace!(
                    "RSS now: {}",
                    byte.get_appropriate_unit(byte_unit::UnitType::Binary)
                );
            }
        }
    }
}
