//! Constants command - fetch the backend's workflow and unit-operation maps.

use crate::api::BackendClient;
use crate::config::Config;
use anyhow::Result;
use colored::Colorize;

pub fn execute() -> Result<()> {
    let config = Config::load()?;
    let client = BackendClient::new(&config)?;

    let constants = client.constants()?;

    println!("{}", "Workflows".bold());
    for (id, name) in &constants.all_workflows {
        println!("  {} {}", id.cyan(), name);
    }
    println!();
    println!("{}", "Unit operations".bold());
    for (id, name) in &constants.all_uos {
        println!("  {} {}", id.cyan(), name);
    }

    Ok(())
}
