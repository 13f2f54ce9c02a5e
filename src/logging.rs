use log::LevelFilter;

/// Route `log` output through `env_logger` at `Info`, overridable with `RUST_LOG`.
pub fn init_logging() {
    env_logger::builder()
        .format_target(false)
        .format_timestamp_secs()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init()
}
