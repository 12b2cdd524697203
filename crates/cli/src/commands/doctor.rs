//! `reviewdesk doctor` — Diagnose setup problems.

use std::path::Path;

use reviewdesk_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 ReviewDesk Doctor — Setup Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  ⚠️  No config file — defaults in use (run `reviewdesk onboard`)");
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config file invalid: {e}");
            println!("\n  ⚠️  1 issue(s) found. See above for details.");
            return Ok(());
        }
    };

    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ❌ No API key — set GEMINI_API_KEY or api_key in config.toml");
        issues += 1;
    }

    println!("  ✅ Model: {}", config.model);

    let out_dir = Path::new(&config.review.output_dir);
    if out_dir.is_dir() {
        println!("  ✅ Output directory exists: {}", out_dir.display());
    } else {
        println!("  ⚠️  Output directory {} will be created on first download", out_dir.display());
    }

    if config.has_api_key() {
        let provider = reviewdesk_providers::build_from_config(&config);
        match provider.health_check().await {
            Ok(true) => println!("  ✅ {} API reachable", provider.name()),
            Ok(false) => {
                println!("  ❌ {} API rejected the request (check key)", provider.name());
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ {} API unreachable: {e}", provider.name());
                issues += 1;
            }
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
