use std::sync::Once;

use cfg_if::cfg_if;
use log::info;

cfg_if! {
    if #[cfg(feature = "debug")] {
        const LOG_ENV: &str = "decimal_assert=trace";
    } else {
        const LOG_ENV: &str = "decimal_assert=info";
    }
}
static INIT: Once = Once::new();

/// Installs the logger once per process. `RUST_LOG` overrides the default
/// filter.
pub fn init_logger() {
    INIT.call_once(|| {
        init();
    });
}

cfg_if! {
    if #[cfg(feature = "flexi_logger")] {
        fn init() {
            let started = flexi_logger::Logger::try_with_env_or_str(LOG_ENV)
                .and_then(|logger| logger.start());
            match started {
                Ok(_) => info!("Logger initialized! (Using flexi_logger) {LOG_ENV}"),
                Err(err) => eprintln!("Failed to initialize logger: {err}"),
            }
        }
    }

    else {
        fn init() {
            println!("No logger enabled. Logs will not be recorded.");
        }
    }
}
