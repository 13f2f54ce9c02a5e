// Test modules for all components
pub mod support;

pub mod test_network;
pub mod test_policy;

#[ctor::ctor]
fn init() {
    use log::LevelFilter;
    let _ = env_logger::builder()
        .is_test(true)
        .format_timestamp_secs()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .try_init();
}
