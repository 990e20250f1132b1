pub mod build_info;

use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: [&str; 2] = ["budget_tracker=info", "tracker_core=warn"];

/// Initializes the global tracing subscriber. Logs go to stderr so command
/// output on stdout stays clean; `RUST_LOG` adds or overrides directives.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        for directive in DEFAULT_DIRECTIVES {
            if let Ok(parsed) = directive.parse::<Directive>() {
                filter = filter.add_directive(parsed);
            }
        }

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
