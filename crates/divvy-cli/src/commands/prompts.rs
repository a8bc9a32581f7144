//! Prompts-related command implementations

use anyhow::{bail, Result};
use divvy_core::prompts::{load_prompt, override_dir, override_path, PromptId};

/// List all available prompts and their override status
pub fn cmd_prompts_list() -> Result<()> {
    println!("Available Prompts:\n");

    println!("{:<30}  {}", "ID", "OVERRIDE");
    println!("{}", "-".repeat(50));

    for id in PromptId::all() {
        let has_override = override_path(*id).is_some_and(|p| p.exists());
        let override_status = if has_override { "✓ Custom" } else { "Default" };
        println!("{:<30}  {}", id.as_str(), override_status);
    }

    println!();
    cmd_prompts_path()?;

    println!();
    println!("To customize a prompt:");
    println!("  1. Copy the default to the override directory as <id>.md");
    println!("  2. Edit the file with your changes");

    Ok(())
}

/// Show the active content of a specific prompt
pub fn cmd_prompts_show(prompt_id: &str) -> Result<()> {
    let Some(id) = PromptId::from_id(prompt_id) else {
        let known: Vec<&str> = PromptId::all().iter().map(|p| p.as_str()).collect();
        bail!(
            "Unknown prompt ID: {} (available: {})",
            prompt_id,
            known.join(", ")
        );
    };

    println!("Prompt: {}", id.as_str());
    println!("{}", "-".repeat(50));
    println!("{}", load_prompt(id));

    Ok(())
}

/// Print the override directory
pub fn cmd_prompts_path() -> Result<()> {
    println!(
        "Override directory: {}",
        override_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not available)".to_string())
    );
    Ok(())
}
