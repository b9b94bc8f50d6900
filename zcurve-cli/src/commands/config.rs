//! Config command: print or save the effective configuration or an example file

use std::path::Path;

use crate::config::Config;
use crate::error::{CliError, CliResult};

pub fn execute(config: &Config, example: bool, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            let chosen = if example { Config::example() } else { config.clone() };
            chosen.save_to_file(path).map_err(|e| CliError::config(format!("{:#}", e)))?;
            log::info!("Configuration written to {}", path.display());
        }
        None => print!("{}", render(config, example)?),
    }
    Ok(())
}

fn render(config: &Config, example: bool) -> CliResult<String> {
    let text = if example { Config::example_toml() } else { config.to_toml() };
    text.map_err(|e| CliError::config(format!("{:#}", e)))
}
