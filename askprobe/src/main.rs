use std::path::PathBuf;

use clap::Parser;
use miette::{miette, Result};

use askprobe::{ask_hotel, Config, ConfigStore, CONFIG_PATH};

/// Probe one hotel chatbot with one question from the command line.
#[derive(Parser, Debug)]
#[command(name = "askprobe-cli")]
struct Cli {
    /// Hotel name as stored in the config file
    hotel: String,
    /// Question text to send
    question: String,
    /// Path to the config file
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let store = ConfigStore::open(&cli.config)?;
    let hotel = store
        .hotels()
        .iter()
        .find(|h| h.name == cli.hotel)
        .ok_or_else(|| miette!("no hotel named {:?} in {}", cli.hotel, cli.config.display()))?;

    let client = Config::from_env().client()?;
    let outcome = ask_hotel(&client, hotel, &cli.question).await;

    println!("hotel:    {}", outcome.hotel);
    println!("question: {}", outcome.question);
    println!("status:   {}", outcome.status.as_str());
    println!("response: {}", outcome.response.trim_start());

    Ok(())
}
