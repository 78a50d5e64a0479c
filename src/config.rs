use anyhow::Context;
use dotenvy::dotenv;
use std::env;
use url::Url;

pub const DEFAULT_MERCADOPAGO_BASE_URL: &str = "https://api.mercadopago.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub mercadopago_access_token: String,
    pub mercadopago_base_url: String,
    pub notification_url: String,
    pub webhook_secret: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        let notification_url = required("NOTIFICATION_URL")?;
        Url::parse(&notification_url)
            .with_context(|| format!("NOTIFICATION_URL is not a valid URL: {notification_url}"))?;

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            database_url: required("DATABASE_URL")?,
            mercadopago_access_token: required("MERCADOPAGO_ACCESS_TOKEN")?,
            mercadopago_base_url: env::var("MERCADOPAGO_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_MERCADOPAGO_BASE_URL.to_string()),
            notification_url,
            webhook_secret: required("WEBHOOK_SECRET")?,
        })
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("missing required environment variable {name}"))
}
