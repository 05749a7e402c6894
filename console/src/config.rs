//! Start-up configuration: environment first, command line overrides.

use anyhow::{bail, Context as _};

pub const DEFAULT_API_URL: &str = "http://localhost:8081";
pub const API_URL_VAR: &str = "CATALOG_API_URL";

pub const USAGE: &str = "usage: catalog [--url <origin>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server origin; `/api/books` is appended by the client.
    pub api_url: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::resolve(std::env::var(API_URL_VAR).ok(), std::env::args().skip(1))
    }

    pub fn resolve(
        env_url: Option<String>,
        args: impl IntoIterator<Item = String>,
    ) -> anyhow::Result<Self> {
        let mut api_url = env_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if let Some(value) = arg.strip_prefix("--url=") {
                api_url = value.to_string();
            } else if arg == "--url" {
                api_url = args.next().context("--url needs a value")?;
            } else {
                bail!("unexpected argument `{arg}`\n{USAGE}");
            }
        }

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            bail!("api url must start with http:// or https://, got `{api_url}`");
        }
        Ok(Self { api_url })
    }
}
