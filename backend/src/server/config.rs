//! Process configuration read from the environment.

use std::net::{IpAddr, SocketAddr};

use mockable::Env;

const PORT_ENV: &str = "PORT";
const BIND_HOST_ENV: &str = "BIND_HOST";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const RESET_DATABASE_ENV: &str = "RESET_DATABASE";
const SEED_DATABASE_ENV: &str = "SEED_DATABASE";
const BOOL_EXPECTED: &str = "one of 1, 0, true, false, yes, no, y, n";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Errors raised while reading configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings for the HTTP server and its backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// PostgreSQL URL; `None` selects the in-memory adapters.
    pub database_url: Option<String>,
    /// Clear stored patterns before seeding.
    pub reset_database: bool,
    /// Seed demo patterns into an empty store.
    pub seed_database: bool,
}

impl AppConfig {
    /// Read configuration from `env`, applying defaults for absent values.
    ///
    /// # Examples
    /// ```ignore
    /// let config = AppConfig::from_env(&mockable::DefaultEnv::new())?;
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let port = match non_empty(env, PORT_ENV) {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidEnv {
                name: PORT_ENV,
                value,
                expected: "a TCP port number",
            })?,
            None => DEFAULT_PORT,
        };
        let host_value =
            non_empty(env, BIND_HOST_ENV).unwrap_or_else(|| DEFAULT_BIND_HOST.to_owned());
        let host = host_value
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidEnv {
                name: BIND_HOST_ENV,
                value: host_value.clone(),
                expected: "an IP address",
            })?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            database_url: non_empty(env, DATABASE_URL_ENV),
            reset_database: flag_from_env(env, RESET_DATABASE_ENV)?,
            seed_database: flag_from_env(env, SEED_DATABASE_ENV)?,
        })
    }

    /// Whether startup should touch the pattern seed at all.
    pub fn wants_seeding(&self) -> bool {
        self.reset_database || self.seed_database
    }
}

fn non_empty<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn flag_from_env<E: Env>(env: &E, name: &'static str) -> Result<bool, ConfigError> {
    match non_empty(env, name) {
        None => Ok(false),
        Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
