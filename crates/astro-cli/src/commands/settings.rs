use anyhow::{Result, anyhow};
use astro_core::config::AppConfig;
use astro_core::user::TextSpeed;
use std::str::FromStr;

use super::{AuthArgs, start_app, wait_for_session};

pub async fn text_speed(config: &AppConfig, auth: AuthArgs, speed: &str) -> Result<()> {
    let speed = TextSpeed::from_str(&speed.to_ascii_lowercase())
        .map_err(|_| anyhow!("text speed must be slow, medium or fast, got '{}'", speed))?;
    let app = start_app(config, auth);
    wait_for_session(&app).await?;

    let result = app.account().update_text_speed(speed).await;
    app.shutdown().await;
    result?;
    Ok(())
}
