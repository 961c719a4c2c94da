//! tweetprep — command-line front end.
//!
//! Usage:
//!   tweetprep clean tweets.txt tweets.clean.txt
//!   tweetprep lemmatize "The cats were running."
//!   tweetprep lemmatize --data-dir ./nltk_data "The cats were running."
//!   tweetprep lemmatize --config toolkit.json "The cats were running."

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use tweetprep::{preprocess_tweet_file, Toolkit, ToolkitConfig};

#[derive(Parser)]
#[command(name = "tweetprep")]
#[command(version)]
#[command(about = "Lemmatize sentences and clean tweet corpora", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a tweet file (one "<user> <text>" record per line)
    Clean {
        /// Raw input file
        src: PathBuf,

        /// Output file (overwritten)
        dst: PathBuf,
    },

    /// Print the lowercase lemmas of a sentence
    Lemmatize {
        /// JSON toolkit config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Extra data root, searched first
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Sentence to normalise
        sentence: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Clean { src, dst } => {
            preprocess_tweet_file(&src, &dst)?;
            info!("Cleaned {} → {}", src.display(), dst.display());
        }
        Commands::Lemmatize { config, data_dir, sentence } => {
            let mut cfg = match config {
                Some(path) => ToolkitConfig::from_file(&path)?,
                None => ToolkitConfig::default(),
            };
            if let Some(dir) = data_dir {
                cfg.data_paths.insert(0, dir);
            }

            let toolkit = Toolkit::load(&cfg)?;
            println!("{}", toolkit.preprocess(&sentence)?.join(" "));
        }
    }
    Ok(())
}
