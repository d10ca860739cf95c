use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use content::Catalog;
use serde::Deserialize;
use site_core::{MailtoOutbox, Outbox, WebhookOutbox};
use tracing::{info, warn};
use url::Url;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub content_path: Option<PathBuf>,
    pub contact_recipient: Option<String>,
    pub contact_webhook_url: Option<String>,
    pub contact_body_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            content_path: None,
            contact_recipient: None,
            contact_webhook_url: None,
            contact_body_limit_bytes: 16 * 1024,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    content_path: Option<PathBuf>,
    contact_recipient: Option<String>,
    contact_webhook_url: Option<String>,
    contact_body_limit_bytes: Option<usize>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file if present, then environment variables.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_addr {
                    settings.server_bind = v;
                }
                if let Some(v) = file_cfg.content_path {
                    settings.content_path = Some(v);
                }
                if let Some(v) = file_cfg.contact_recipient {
                    settings.contact_recipient = Some(v);
                }
                if let Some(v) = file_cfg.contact_webhook_url {
                    settings.contact_webhook_url = Some(v);
                }
                if let Some(v) = file_cfg.contact_body_limit_bytes {
                    settings.contact_body_limit_bytes = v;
                }
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring malformed settings file");
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("APP__CONTENT_PATH") {
        settings.content_path = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__CONTACT_RECIPIENT") {
        settings.contact_recipient = Some(v);
    }

    if let Some(v) = env("APP__CONTACT_WEBHOOK_URL") {
        settings.contact_webhook_url = Some(v);
    }

    if let Some(v) = env("APP__CONTACT_BODY_LIMIT_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.contact_body_limit_bytes = parsed;
        }
    }

    settings
}

pub fn load_catalog(settings: &Settings) -> anyhow::Result<Catalog> {
    match &settings.content_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load content from '{}'", path.display())),
        None => Catalog::embedded().context("bundled content is invalid"),
    }
}

/// Webhook delivery when a URL is configured, otherwise a mailto hand-off to
/// the configured recipient or the site's own address.
pub fn build_outbox(settings: &Settings, catalog: &Catalog) -> anyhow::Result<Arc<dyn Outbox>> {
    let webhook = settings
        .contact_webhook_url
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty());

    if let Some(raw) = webhook {
        let endpoint =
            Url::parse(raw).with_context(|| format!("invalid contact webhook url '{raw}'"))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("contact webhook url must be http or https, got '{raw}'");
        }
        info!(%endpoint, "contact messages delivered via webhook");
        return Ok(Arc::new(WebhookOutbox::new(endpoint)));
    }

    let recipient = settings
        .contact_recipient
        .clone()
        .unwrap_or_else(|| catalog.site().email.clone());
    info!(%recipient, "contact messages handed off as mailto links");
    Ok(Arc::new(MailtoOutbox::new(recipient)))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
