use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use formwork_core::AppError;
use formwork_domain::ExternalContext;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub form_schema_dir: PathBuf,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub external_values: ExternalContext,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let form_schema_dir = PathBuf::from(required_non_empty_env("FORM_SCHEMA_DIR")?);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = match env::var("API_PORT") {
            Ok(value) => value.parse::<u16>().map_err(|error| {
                AppError::Configuration(format!("invalid API_PORT '{value}': {error}"))
            })?,
            Err(_) => 3001,
        };

        let external_values = match env::var("FORM_EXTERNAL_VALUES") {
            Ok(value) if !value.trim().is_empty() => parse_external_values(&value)?,
            _ => ExternalContext::new(),
        };

        Ok(Self {
            form_schema_dir,
            frontend_url,
            api_host,
            api_port,
            external_values,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Configuration(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_external_values(value: &str) -> Result<ExternalContext, AppError> {
    let parsed = serde_json::from_str(value).map_err(|error| {
        AppError::Configuration(format!("FORM_EXTERNAL_VALUES is not valid JSON: {error}"))
    })?;

    ExternalContext::from_value(parsed).map_err(|error| {
        AppError::Configuration(format!("invalid FORM_EXTERNAL_VALUES: {error}"))
    })
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value =
        env::var(name).map_err(|_| AppError::Configuration(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Configuration(format!("{name} must not be empty")));
    }

    Ok(value)
}
