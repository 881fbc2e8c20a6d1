//! Configure command - write settings to an env file.

use std::path::PathBuf;

use colored::Colorize;
use datasight::config::{env_file, parse_candidates, MODEL_ENV};
use datasight::llm::API_KEY_ENV;

pub fn run(
    api_key: Option<String>,
    model: Option<String>,
    env_path: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    if api_key.is_none() && model.is_none() {
        return Err("nothing to configure: pass --api-key and/or --model".into());
    }

    if let Some(key) = api_key {
        let key = key.trim();
        if key.is_empty() {
            return Err("API key is empty".into());
        }
        env_file::upsert(&env_path, API_KEY_ENV, key)?;
        println!(
            "{} {} to {}",
            "Saved".green().bold(),
            API_KEY_ENV,
            env_path.display()
        );
    }

    if let Some(model) = model {
        let candidates = parse_candidates(&model);
        if candidates.is_empty() {
            return Err("no model names given".into());
        }
        let value = candidates.join(",");
        env_file::upsert(&env_path, MODEL_ENV, &value)?;
        println!(
            "{} {}={} to {}",
            "Saved".green().bold(),
            MODEL_ENV,
            value,
            env_path.display()
        );
    }

    Ok(())
}
