use log::error;
use std::sync::Arc;

use seo_meta_gen::{server, AppConfig, SeoGenerator, SetupError};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SetupError> {
    let config = AppConfig::load()?;
    let generator = SeoGenerator::builder().config(config.clone()).build()?;
    server::serve(&config, Arc::new(generator)).await
}
