use std::{env, process};

use senscritique2letterboxd::{config::Config, logging};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    logging::setup_logging();

    log::info!("SensCritique movie extractor");

    let config = match Config::from_env(env::args().nth(1)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = senscritique2letterboxd::run(config).await {
        log::error!("Extraction failed: {}", e);
        process::exit(1);
    }
}
