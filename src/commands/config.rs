use anyhow::Result;
use evely_core::config::EvelyConfig;
use owo_colors::OwoColorize;

pub fn run(config: &EvelyConfig) -> Result<()> {
    let config_path = EvelyConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Storage:  {}", config.storage_path().display());
    println!();
    println!("{}", "Effective settings".bold());
    print!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
