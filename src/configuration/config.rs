#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiHealthCheckTimeout,
    ApiURL,
    ConfigFile,
    Endpoint,
}

fn config_dir() -> path::PathBuf {
    #[cfg(not(target_os = "macos"))]
    let dir = dirs::config_dir();
    #[cfg(target_os = "macos")]
    let dir = std::env::var("HOME")
        .ok()
        .map(|home| return path::PathBuf::from(home).join(".config"));

    return dir.unwrap_or_else(|| return path::PathBuf::from(".")).join("liftplan");
}

/// Checks values that clap can't check for us. Used for both config file and
/// command line values.
fn validate(key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::ApiURL => {
            let parsed = match url::Url::parse(value) {
                Ok(parsed) => parsed,
                Err(err) => bail!("Invalid value for '{key}': {value} ({err})"),
            };

            if !["http", "https"].contains(&parsed.scheme()) {
                bail!("Invalid value for '{key}': {value} (must be an http or https URL)");
            }
        }
        ConfigKey::ApiHealthCheckTimeout => {
            if value.parse::<u64>().is_err() {
                bail!("Invalid value for '{key}': {value} (must be a number of milliseconds)");
            }
        }
        ConfigKey::ConfigFile | ConfigKey::Endpoint => (),
    }

    return Ok(());
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        match key {
            ConfigKey::ApiHealthCheckTimeout => return "1000".to_string(),
            ConfigKey::ApiURL => return "http://localhost:8000".to_string(),
            ConfigKey::ConfigFile => {
                return config_dir()
                    .join("config.toml")
                    .to_string_lossy()
                    .to_string();
            }
            ConfigKey::Endpoint => return "/api/backend/plan/generate-agent/".to_string(),
        }
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    let val_str = if let Some(val_int) = val.as_integer() {
                        val_int.to_string()
                    } else if let Some(val_str) = val.as_str() {
                        val_str.to_string()
                    } else {
                        bail!("{config_file} has an invalid value for key '{key}'");
                    };

                    if val_str.is_empty() {
                        continue;
                    }

                    if let Err(err) = validate(key, &val_str) {
                        bail!("{config_file}: {err}");
                    }

                    Config::set(key, &val_str);
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }

                    validate(key, val)?;
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            endpoint = Config::get(ConfigKey::Endpoint),
            api_health_check_timeout = Config::get(ConfigKey::ApiHealthCheckTimeout),
            config_file = Config::get(ConfigKey::ConfigFile),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.parse::<u64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
