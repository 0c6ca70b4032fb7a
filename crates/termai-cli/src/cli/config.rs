//! `termai config`: print the resolved configuration.
//!
//! The API key itself is never printed, only whether it was found.

use anyhow::Result;
use console::style;

use termai_infra::config::config_path;

use super::agent::ResolvedAgent;

/// Display the configuration the chat session would run with.
pub async fn show_config(agent: &ResolvedAgent, json: bool) -> Result<()> {
    let config = &agent.config;
    let path = config_path(&agent.config_dir);
    let file_exists = tokio::fs::try_exists(&path).await.unwrap_or(false);
    let key_set = agent.api_key.is_some();

    if json {
        let out = serde_json::json!({
            "config_file": path.display().to_string(),
            "config_file_exists": file_exists,
            "name": config.name,
            "provider": config.provider.to_string(),
            "model": config.model,
            "base_url": config.base_url,
            "api_key_env": config.api_key_env,
            "api_key_set": key_set,
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
            "instructions": config.instructions,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let unset = || style("default").dim().to_string();
    let file_note = if file_exists {
        String::new()
    } else {
        style(" (not found, using defaults)").dim().to_string()
    };

    println!();
    println!("  {} {}", style("⚙").bold(), style(&config.name).cyan().bold());
    println!();
    println!("  {}      {}{}", style("Config:").bold(), path.display(), file_note);
    println!("  {}    {}", style("Provider:").bold(), config.provider);
    println!("  {}       {}", style("Model:").bold(), config.model);
    println!("  {}    {}", style("Base URL:").bold(), config.base_url);
    println!(
        "  {}     {} {}",
        style("API key:").bold(),
        config.api_key_env,
        if key_set {
            style("set").green().to_string()
        } else {
            style("missing").red().bold().to_string()
        }
    );
    println!(
        "  {} {}",
        style("Temperature:").bold(),
        config
            .temperature
            .map(|t| t.to_string())
            .unwrap_or_else(unset)
    );
    println!(
        "  {}  {}",
        style("Max tokens:").bold(),
        config
            .max_tokens
            .map(|t| t.to_string())
            .unwrap_or_else(unset)
    );
    println!();
    println!("  {}", style("Instructions:").bold());
    println!("  {}", style(&config.instructions).dim());
    println!();

    Ok(())
}
