use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` for the
/// workspace crates when `verbose` is on. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,splitsync=debug,splitsync_client=debug,splitsync_cli=debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_only_workspace_crates() {
        assert_eq!(default_directives(false), "info");

        let verbose = default_directives(true);
        assert!(verbose.starts_with("info,"));
        for krate in ["splitsync", "splitsync_client", "splitsync_cli"] {
            assert!(verbose.contains(&format!("{krate}=debug")));
        }
        assert!(EnvFilter::try_new(verbose).is_ok());
    }

    #[test]
    fn second_init_keeps_the_first_subscriber() {
        init(false);
        assert!(tracing::dispatcher::has_been_set());

        init(true);
        assert!(tracing::dispatcher::has_been_set());
    }
}
