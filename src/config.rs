use crate::error::{Error, Result};
use crate::models::interview::InterviewType;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub notification_webhook_url: Option<Url>,
    pub webhook_secret: Option<String>,
    pub auto_advance_enabled: bool,
    pub auto_advance_min_rating: i32,
    pub auto_advance_interview_types: Vec<InterviewType>,
    pub progress_autosave: bool,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

pub const DEFAULT_ADVANCEMENT_TYPES: [InterviewType; 4] = [
    InterviewType::PhoneScreen,
    InterviewType::Technical,
    InterviewType::Final,
    InterviewType::Panel,
];

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let notification_webhook_url = match env::var("NOTIFICATION_WEBHOOK_URL") {
            Ok(raw) if !raw.trim().is_empty() => Some(Url::parse(raw.trim())?),
            _ => None,
        };

        let auto_advance_interview_types = match env::var("AUTO_ADVANCE_INTERVIEW_TYPES") {
            Ok(raw) => parse_interview_types(&raw)?,
            Err(_) => DEFAULT_ADVANCEMENT_TYPES.to_vec(),
        };

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            database_url: get_env("DATABASE_URL")?,
            database_max_connections: get_env_parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            notification_webhook_url,
            webhook_secret: env::var("WEBHOOK_SECRET").ok().filter(|s| !s.is_empty()),
            auto_advance_enabled: get_env_parse_or("AUTO_ADVANCE_ENABLED", true)?,
            auto_advance_min_rating: get_env_parse_or("AUTO_ADVANCE_MIN_RATING", 3)?,
            auto_advance_interview_types,
            progress_autosave: get_env_parse_or("PROGRESS_AUTOSAVE", true)?,
            log_format,
        })
    }
}

pub fn parse_interview_types(raw: &str) -> Result<Vec<InterviewType>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<InterviewType>().map_err(|_| {
                Error::Config(format!(
                    "Invalid value for AUTO_ADVANCE_INTERVIEW_TYPES: {}",
                    s
                ))
            })
        })
        .collect()
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
