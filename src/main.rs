use kea_dhcp_summary::collect_report;
use kea_dhcp_summary::config::{self, Config};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging();
    log::info!("#Start main()");

    let config = Config::from_env();
    print!("{}", collect_report(&config));

    log::info!("#End main()");
}

/// log4rs from file, or warnings to stderr. Stdout belongs to the agent section.
fn init_logging() {
    let path = config::log_config_path();
    let Err(file_err) = log4rs::init_file(&path, Default::default()) else {
        return;
    };

    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let fallback = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    match fallback.map(log4rs::init_config) {
        Ok(Ok(_handle)) => log::debug!("log config {path} not used: {file_err}"),
        Ok(Err(e)) => eprintln!("Error initializing log4rs: {e}"),
        Err(e) => eprintln!("Error building log4rs config: {e}"),
    }
}
