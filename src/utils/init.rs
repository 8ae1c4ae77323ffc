use std::sync::Arc;

use anyhow::Context;
use log::info;

use crate::utils::config::AppConfig;

/// Initializes logging, configuration and the locale. Called once at process
/// start, before the server is constructed.
pub fn init() -> anyhow::Result<Arc<AppConfig>> {
    log4rs::init_file("config/log4rs.yml", Default::default())
        .context("failed to initialize logging")?;

    let config = AppConfig::load("config/app.yml")
        .context("failed to load application configuration")?;

    rust_i18n::set_locale(&config.locales.default);
    info!("application configuration loaded, locale: {}", config.locales.default);

    Ok(Arc::new(config))
}
