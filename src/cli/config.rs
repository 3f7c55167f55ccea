//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "geocoder.base_url")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    #[arg(allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (args.key.as_deref(), args.value.as_deref()) {
        (None, _) => print!("{}", render_all(&config)),
        (Some(key), None) => println!("{}", lookup(&config, key)?),
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, lookup(&config, key)?);
        }
    }

    Ok(())
}

/// Value of one key, or an error listing the valid keys
fn lookup(config: &Config, key: &str) -> Result<String> {
    config.get(key).ok_or_else(|| {
        Error::Config(format!(
            "Unknown config key: {} (available: {})",
            key,
            Config::available_keys().join(", ")
        ))
    })
}

/// All configuration values grouped by section, TOML-like
fn render_all(config: &Config) -> String {
    let mut output = String::new();
    let mut section = "";

    for key in Config::available_keys() {
        let Some((prefix, name)) = key.split_once('.') else {
            continue;
        };
        if prefix != section {
            if !section.is_empty() {
                output.push('\n');
            }
            output.push_str(&format!("[{}]\n", prefix));
            section = prefix;
        }
        if let Some(value) = config.get(key) {
            output.push_str(&format!("{} = {}\n", name, value));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_all_groups_sections() {
        let output = render_all(&Config::default());

        assert!(output.starts_with("[geocoder]\n"));
        assert!(output.contains("\n[map]\n"));
        assert!(output.contains("\n[links]\n"));
        assert!(output.contains("debounce_ms = 500\n"));
        assert!(output.contains("viewbox = -56.5,-26.5,-55.5,-28.5\n"));
    }

    #[test]
    fn test_lookup_unknown_key() {
        let err = lookup(&Config::default(), "defaults.backend").unwrap_err();
        assert!(err.to_string().contains("geocoder.base_url"));
    }
}
