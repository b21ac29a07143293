use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Install a global `tracing` subscriber that prints this crate's own
/// diagnostics (file deletion at startup, appended entries, rejected
/// values) to stdout.
///
/// The logger itself never installs a subscriber; call this from the
/// host application if nothing else does.
///
/// **Parameters**
/// - `max_level`: most verbose level to print. `Level::DEBUG` shows one
///   event per appended entry.
///
/// **Returns**
/// - `true` if the subscriber was installed.
/// - `false` if a global default subscriber was already set.
pub fn init_stdout_tracing(max_level: Level) -> bool {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let subscriber = Registry::default()
        .with(LevelFilter::from_level(max_level))
        .with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber).is_ok()
}
