use screentime::app::{App, Tui};
use screentime::config::AppConfig;
use screentime::{logging, Result};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.log_file_path()?)?;
    info!("starting screentime");

    let mut tui = Tui::new(config.tick_rate()?)?;
    tui.init()?;

    let provider = config.provider();
    let mut app = App::new(config, provider);
    let result = app.run(&mut tui).await;

    tui.restore()?;
    if let Err(e) = &result {
        error!("application error: {}", e);
    }
    result
}
