use kursbot::config::Config;

#[tokio::main]
async fn main() -> kursbot::error::Result<()> {
    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // The log destination is part of the config, so this goes to stderr.
            kursbot::logging::init(None)?;
            log::error!("Failed to load configuration: {e}");
            return Err(e);
        }
    };
    kursbot::logging::init(config.log_file.as_deref())?;
    log::info!("Starting kursbot Telegram bot");
    config.log_summary();

    match kursbot::run(config).await {
        Ok(()) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {e}");
            Err(e)
        }
    }
}
