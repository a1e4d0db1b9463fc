use std::io;

use anyhow::Result;
use log::*;

use bestfit::{MemoryManager, config::Config, shell};

fn main() -> Result<()> {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    pretty_env_logger::formatted_builder()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    info!("Managing {} units with best fit", config.total_size);
    let mut manager = MemoryManager::new(config.total_size)?;

    shell::run(&mut manager, io::stdin().lock(), io::stdout().lock())?;

    info!("Session ended.");
    Ok(())
}
