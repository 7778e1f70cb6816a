use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout stays clean for announcements.
pub fn init_tracing() {
    // RUST_LOG=fortuna_core=debug,fortuna_bridge=debug
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,fortuna_core=info,fortuna_bridge=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();
}

/// Route panics through tracing so they land next to the spin log.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<opaque panic>".to_string());
        let at = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_default();
        let thread = std::thread::current().name().unwrap_or("<unnamed>").to_string();

        tracing::error!(%thread, %at, %message, "panic");
    }));
}
