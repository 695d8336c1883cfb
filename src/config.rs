use crate::error::{BadEnvVarSnafu, InvalidTimezoneSnafu, ParseNumberEnvVarSnafu, RegistrarResult};
use dotenvy::var;
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use snafu::ResultExt;
use std::{sync::Arc, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_SERVER_IP: &str = "127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    api_config: Arc<ApiConfig>,
    server_ip: Arc<str>,
    timezone: TimeZone,
}

impl RuntimeConfiguration {
    pub fn new() -> RegistrarResult<Self> {
        let server_ip = optional_env_var("REGISTRAR_SERVER_IP")?
            .unwrap_or_else(|| DEFAULT_SERVER_IP.to_string());

        let timezone = match optional_env_var("REGISTRAR_TIMEZONE")? {
            Some(name) => TimeZone::get(&name).context(InvalidTimezoneSnafu { name })?,
            None => TimeZone::system(),
        };

        Ok(Self {
            api_config: Arc::new(ApiConfig::from_env()?),
            server_ip: server_ip.into(),
            timezone,
        })
    }

    pub fn from_parts(api_config: ApiConfig, server_ip: &str, timezone: TimeZone) -> Self {
        Self {
            api_config: Arc::new(api_config),
            server_ip: server_ip.into(),
            timezone,
        }
    }

    pub fn api_config(&self) -> Arc<ApiConfig> {
        self.api_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn timezone(&self) -> &TimeZone {
        &self.timezone
    }

    /// The calendar day in the configured zone, used as the default enrollment date.
    pub fn today(&self) -> Date {
        Timestamp::now().to_zoned(self.timezone.clone()).date()
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { base_url, timeout }
    }

    pub fn from_env() -> RegistrarResult<Self> {
        let base_url = optional_env_var("REGISTRAR_API_BASE_URL")?
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let timeout = match optional_env_var("REGISTRAR_API_TIMEOUT_SECS")? {
            Some(secs) => secs.trim().parse().context(ParseNumberEnvVarSnafu {
                name: "REGISTRAR_API_TIMEOUT_SECS",
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(base_url, Duration::from_secs(timeout)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn optional_env_var(name: &'static str) -> RegistrarResult<Option<String>> {
    match var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(source) => Err(source).context(BadEnvVarSnafu { name }),
    }
}
