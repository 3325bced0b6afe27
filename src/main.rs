use anyhow::Result;
use agro_news_classifier::{
    app::ClassifierApp,
    config,
    infrastructure::{directories, logging, shutdown::Shutdown},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories, &config.io)?;
    logging::init_tracing(&config.logging, &paths.logs_dir)?;

    let (shutdown, _) = Shutdown::new();
    shutdown.install_signal_handlers();

    let app = ClassifierApp::initialize(config, shutdown)?;
    if let Err(err) = app.run().await {
        tracing::error!(target: "app", error = %err, "ingestion failed");
        return Err(err);
    }
    Ok(())
}
