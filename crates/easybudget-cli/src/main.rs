mod commands;
mod context;
mod help;
mod output;
mod render;
mod shell;
mod system_clock;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with sensible defaults.
fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env()
            .add_directive("easybudget=info".parse().expect("static directive"))
            .add_directive("easybudget_core=info".parse().expect("static directive"));

        fmt().with_env_filter(filter).init();
    });
}

fn main() {
    init();

    if let Err(err) = shell::run_cli() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
