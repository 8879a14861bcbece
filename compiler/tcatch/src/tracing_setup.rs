use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `TCATCH_LOG=tc_desugar=debug`.
const LOG_ENV: &str = "TCATCH_LOG";

/// Install a hierarchical stderr logger.
///
/// Does nothing unless `TCATCH_LOG` or `RUST_LOG` is set. Safe to call more
/// than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let filter = match EnvFilter::try_from_env(LOG_ENV) {
            Ok(filter) => filter,
            Err(_) if std::env::var_os(LOG_ENV).is_some() => {
                eprintln!("warning: ignoring malformed {LOG_ENV}");
                return;
            }
            Err(_) => match EnvFilter::try_from_default_env() {
                Ok(filter) => filter,
                Err(_) => return,
            },
        };

        let layer = tracing_tree::HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true)
            .with_writer(std::io::stderr);
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init();
    });
}
