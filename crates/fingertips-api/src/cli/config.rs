//! `fingertips config`: print the resolved configuration.

use anyhow::Result;
use console::style;

use fingertips_infra::config::Settings;

/// Print settings. The API key is reported only as set or unset.
pub fn show_config(settings: &Settings, json: bool) -> Result<()> {
    let key_state = if settings.api_key.is_some() { "set" } else { "unset" };

    if json {
        let value = serde_json::json!({
            "database_url": settings.database_url,
            "api_key": key_state,
            "base_url": settings.file.base_url,
            "completion": settings.file.completion,
            "server": settings.file.server,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let completion = &settings.file.completion;
    let server = &settings.file.server;

    println!();
    println!("  {}", style("── Store ──").dim());
    println!("  Database:   {}", style(&settings.database_url).cyan());
    println!();
    println!("  {}", style("── Provider ──").dim());
    println!("  Base URL:   {}", settings.file.base_url);
    println!("  Model:      {}", style(&completion.model).bold());
    println!("  Max tokens: {}", completion.max_tokens);
    if let Some(temperature) = completion.temperature {
        println!("  Temperature: {temperature}");
    }
    let key_styled = if settings.api_key.is_some() {
        style(key_state).green()
    } else {
        style(key_state).yellow()
    };
    println!("  API key:    {key_styled}");
    println!();
    println!("  {}", style("── Server ──").dim());
    println!("  Bind:       {}:{}", server.host, server.port);
    println!();

    Ok(())
}
