use anyhow::{Context, Result};
use astro_core::config::AppConfig;
use astro_infrastructure::ConfigService;

/// Prints the configuration after file loading and environment overrides.
pub fn show(config: &AppConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
    println!("{}", rendered);
    Ok(())
}

pub fn init(service: &ConfigService) -> Result<()> {
    let path = service.paths().config_file()?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    service.save_config(&AppConfig::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
