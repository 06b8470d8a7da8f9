use std::{env, path::PathBuf};

use crate::error::{Error, Result};

pub const PROFILE_URL_VAR: &str = "SENSCRITIQUE_PROFILE_URL";
pub const OUTPUT_FILE_VAR: &str = "LETTERBOXD_OUTPUT_FILE";
pub const USE_BROWSER_VAR: &str = "SENSCRITIQUE_USE_BROWSER";
pub const HEADLESS_VAR: &str = "SENSCRITIQUE_HEADLESS";

pub const DEFAULT_OUTPUT_FILE: &str = "letterboxd-import.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub profile_url: String,
    pub output_file: PathBuf,
    pub use_browser: bool,
    pub headless: bool,
}

impl Config {
    /// Reads the environment, with `profile_url` taking precedence over
    /// `SENSCRITIQUE_PROFILE_URL` when given.
    pub fn from_env(profile_url: Option<String>) -> Result<Self> {
        Self::from_lookup(profile_url, |key| env::var(key).ok())
    }

    fn from_lookup<F>(profile_url: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile_url = profile_url
            .or_else(|| lookup(PROFILE_URL_VAR))
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "{} not set. Copy env.template to .env and set your profile URL",
                    PROFILE_URL_VAR
                ))
            })?;

        let output_file = lookup(OUTPUT_FILE_VAR)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string())
            .into();

        let use_browser = parse_flag(lookup(USE_BROWSER_VAR));
        if use_browser && !cfg!(feature = "browser") {
            return Err(Error::Config(format!(
                "{} is set but this binary was built without the `browser` feature",
                USE_BROWSER_VAR
            )));
        }

        Ok(Config {
            profile_url,
            output_file,
            use_browser,
            headless: parse_flag(lookup(HEADLESS_VAR)),
        })
    }
}

fn parse_flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
