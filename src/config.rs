use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CentroError;

/// The HTTP listener always binds here.
pub const LISTEN_ADDR: &str = "0.0.0.0:3000";

const ENV_KEYS: &[&str] = &[
    "DB_HOST",
    "DB_PORT",
    "DB_USER",
    "DB_PASSWORD",
    "DB_NAME",
    "DATABASE_URL",
    "LOGLEVEL",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    /// Full connection URL; takes precedence over the `db_*` fields.
    pub database_url: Option<String>,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_host: "localhost".to_string(),
            db_port: 3306,
            db_user: "root".to_string(),
            db_password: String::new(),
            db_name: "centro".to_string(),
            database_url: None,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Load defaults overlaid with the process environment.
    pub fn load() -> Result<Self, CentroError> {
        Self::from_figment(Figment::new().merge(Env::raw().only(ENV_KEYS)))
    }

    fn from_figment(overrides: Figment) -> Result<Self, CentroError> {
        let cfg = Figment::from(Serialized::defaults(Config::default()))
            .merge(overrides)
            .extract()?;
        Ok(cfg)
    }

    /// Connection URL handed to the pool.
    pub fn database_url(&self) -> Result<String, CentroError> {
        if let Some(url) = self.database_url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.clone());
        }
        let mut url = Url::parse(&format!("mysql://{}:{}", self.db_host, self.db_port))?;
        url.set_path(&self.db_name);
        // Infallible for URLs that carry a host, which the mysql scheme always does.
        let _ = url.set_username(&self.db_user);
        if !self.db_password.is_empty() {
            let _ = url.set_password(Some(&self.db_password));
        }
        Ok(url.into())
    }

    /// Same as [`Config::database_url`] with the password masked, for logs.
    pub fn redacted_url(&self) -> String {
        match self.database_url().and_then(|raw| Ok(Url::parse(&raw)?)) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("redacted"));
                }
                url.into()
            }
            Err(_) => "<invalid database url>".to_string(),
        }
    }
}
