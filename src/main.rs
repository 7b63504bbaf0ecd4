use std::env;
use std::process;

use clap::Parser;
use hid_fixup::cli::{main_cli, Args};

#[tokio::main]
async fn main() {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();

    let args = Args::parse();
    log::debug!("Starting hid-fixup v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = main_cli(args).await {
        log::error!("{e}");
        process::exit(1);
    }
}
