use std::path::PathBuf;

use clap::Parser;
use studyhall::{Study, StudyOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the lesson from
    #[arg(short, long)]
    lesson: PathBuf,

    /// Questions per drill round (0 = endless)
    #[arg(long, default_value_t = 10)]
    drill_length: usize,

    /// Seed for shuffles and question selection (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = StudyOptions {
        drill_length: args.drill_length,
        seed: args.seed,
    };
    let study = Study::from_json(&args.lesson, options).expect("Failed to load lesson");

    if let Err(e) = study.run().await {
        eprintln!("Error running studyhall: {}", e);
        std::process::exit(1);
    }
}
