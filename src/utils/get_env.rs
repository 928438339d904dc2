use anyhow::{Context, Error};
use dotenv::dotenv;
use std::env;
use std::str::FromStr;

pub fn get_env_var(key: &str) -> Result<String, Error> {
    dotenv().ok();
    env::var(key).with_context(|| format!("missing required environment variable {key}"))
}

pub fn get_env_var_or(key: &str, default: &str) -> String {
    dotenv().ok();
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Parses an optional variable, falling back to `default` when it is unset or blank.
/// A present but malformed value is an error rather than a silent fallback.
pub fn parse_env_var_or<T>(key: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    dotenv().ok();
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        _ => Ok(default),
    }
}

pub fn env_var_to_vec(key: &str) -> Vec<String> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}
