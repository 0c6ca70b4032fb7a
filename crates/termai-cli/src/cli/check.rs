//! `termai check`: one tiny non-streaming request against the provider.

use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use termai_core::chat::engine::ChatEngine;
use termai_infra::llm::create_provider;

use super::agent::ResolvedAgent;

/// Verify the key and endpoint. Fails (non-zero exit) when the request fails.
pub async fn check(agent: ResolvedAgent, json: bool) -> Result<()> {
    let ResolvedAgent {
        config, api_key, ..
    } = agent;
    let engine = ChatEngine::new(create_provider(&config, api_key));

    let spinner = (!json).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message(format!(
            "Testing connection to {} ({})...",
            style(&config.provider).cyan(),
            config.model
        ));
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    });

    let start = Instant::now();
    let result = engine.check(&config).await;
    let elapsed = start.elapsed();
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result {
        Ok(response) => {
            if json {
                let out = serde_json::json!({
                    "ok": true,
                    "provider": config.provider.to_string(),
                    "model": response.model,
                    "elapsed_ms": elapsed.as_millis() as u64,
                    "input_tokens": response.usage.input_tokens,
                    "output_tokens": response.usage.output_tokens,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!(
                    "  {} {} answered with {} in {:.2}s",
                    style("✓").green(),
                    style(&config.provider).cyan(),
                    style(&response.model).bold(),
                    elapsed.as_secs_f64()
                );
            }
            Ok(())
        }
        Err(e) => {
            if json {
                let out = serde_json::json!({
                    "ok": false,
                    "provider": config.provider.to_string(),
                    "model": config.model,
                    "error": e.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                eprintln!("  {} Connection test failed: {e}", style("✗").red().bold());
            }
            bail!("connection test failed for {}", config.provider)
        }
    }
}
