//! Models command - list usable models and recommend a default.

use std::path::PathBuf;

use colored::Colorize;
use datasight::config::{env_file, MODEL_ENV};
use datasight::llm::recommend_model;
use datasight::Settings;

pub fn run(save: bool, env_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let provider = super::gemini_provider(&settings)?;

    let models = provider.list_models()?;
    let recommended = recommend_model(&models).ok_or("no models returned for this key")?;

    println!("{}", "models that support generateContent:".yellow().bold());
    for name in &models {
        println!("- {}", name);
    }

    println!();
    println!("{} {}", "recommended:".green().bold(), recommended.white());

    if save {
        env_file::upsert(&env_path, MODEL_ENV, &recommended)?;
        println!(
            "{} {}={} to {}",
            "Saved".green().bold(),
            MODEL_ENV,
            recommended,
            env_path.display()
        );
    } else {
        println!(
            "Run {} to use it by default",
            "datasight models --save".cyan().bold()
        );
    }

    Ok(())
}
