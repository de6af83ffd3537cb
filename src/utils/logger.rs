use tracing_subscriber::filter::Directive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "kickrocks";
const VERBOSE_DIRECTIVE: &str = "kickrocks=debug";

/// `RUST_LOG` replaces the default filter. Unless it names this crate
/// explicitly, `--verbose` still turns the crate's progress lines on.
fn build_filter(env_filter: Option<String>, verbose: bool) -> EnvFilter {
    let from_env = env_filter.and_then(|value| {
        let targets_crate = value.contains(CRATE_TARGET);
        EnvFilter::try_new(value).ok().map(|f| (f, targets_crate))
    });

    match from_env {
        Some((filter, targets_crate)) if verbose && !targets_crate => {
            match VERBOSE_DIRECTIVE.parse::<Directive>() {
                Ok(directive) => filter.add_directive(directive),
                Err(_) => filter,
            }
        }
        Some((filter, _)) => filter,
        None if verbose => EnvFilter::new("kickrocks=debug,info"),
        None => EnvFilter::new("kickrocks=warn"),
    }
}

fn filter_from_env(verbose: bool) -> EnvFilter {
    build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), verbose)
}

// Logs go to stderr; stdout is reserved for the --json report.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter_from_env(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter_from_env(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // one object per line, for log shippers
        )
        .init();
}
