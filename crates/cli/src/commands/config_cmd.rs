//! `reviewdesk config` — Configuration management commands.

use reviewdesk_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();
            if !config.has_api_key() {
                warnings.push("No API key set (set GEMINI_API_KEY or REVIEWDESK_API_KEY)");
            }
            if config.review.output_dir.trim().is_empty() {
                warnings.push("review.output_dir is empty; files land in the working directory");
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Model:        {}", config.model);
            println!("   Temperature:  {}", config.temperature);
            println!("   Endpoint:     {}", config.provider.api_url);
            println!(
                "   Defaults:     {} / {}",
                config.review.default_output_mode, config.review.default_file_type
            );
            println!("   Output dir:   {}", config.review.output_dir);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if config.api_key.is_some() {
        config.api_key = Some("***".into());
    }
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn config_path_is_valid() {
        let path = reviewdesk_config::AppConfig::config_dir().join("config.toml");
        assert!(path.to_str().unwrap().ends_with(".reviewdesk/config.toml") || cfg!(windows));
    }
}
