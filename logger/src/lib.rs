//! Default logging setup for the graphdump workspace.
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(missing_docs)]

const TIMESTAMP_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightBlack)));

const TARGET_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Magenta)));

/// Performs the default logging setup used by graphdump binaries and demos.
///
/// The filter defaults to `info` and is overridden with the `GRAPHDUMP_LOG`
/// environment variable; `GRAPHDUMP_LOG_STYLE` controls color output.
pub fn setup() {
    let start_time = std::time::Instant::now();

    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("GRAPHDUMP_LOG", "info")
            .write_style("GRAPHDUMP_LOG_STYLE"),
    )
    .format(move |buf, record| {
        use std::io::Write;

        let timestamp = start_time.elapsed();
        writeln!(
            buf,
            "{} {} {} {}",
            format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
            format_args!(
                "{style}{target}{style:#}",
                style = TARGET_STYLE,
                target = record.target()
            ),
            format_args!(
                "{style}{level}{style:#}",
                style = buf.default_level_style(record.level()),
                level = record.level()
            ),
            record.args(),
        )
    })
    .init();
}

/// Logging setup for tests.
///
/// Uses `level` as the default filter (still overridable with `GRAPHDUMP_LOG`) and
/// is safe to call from multiple tests; only the first call takes effect.
pub fn test_setup(level: &str) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::new().filter_or("GRAPHDUMP_LOG", level),
    )
    .is_test(true)
    .try_init();
}
