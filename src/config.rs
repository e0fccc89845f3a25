use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Two-column `rank,domain` popularity dataset loaded at startup.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
    #[serde(default = "default_whois_timeout")]
    pub whois_timeout_seconds: u64,
    #[serde(default = "default_dns_timeout")]
    pub dns_timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
}

fn default_dataset_path() -> String {
    "top-1m.csv".to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_whois_timeout() -> u64 {
    10
}

fn default_dns_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36"
        .to_string()
}

fn default_max_redirects() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            fetch_timeout_seconds: default_fetch_timeout(),
            whois_timeout_seconds: default_whois_timeout(),
            dns_timeout_seconds: default_dns_timeout(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    pub fn generate_default(path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(&Config::default())?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {path}"))?;
        Ok(())
    }
}
