use std::{path::PathBuf, process};

use clap::{ArgAction, Parser, Subcommand};
use tizencodec_cli::{
    GlobalOptions,
    commands::{
        run_consume_all_command, run_consume_command, run_generate_all_command,
        run_generate_command, run_languages_command,
    },
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Localization format to use
    #[arg(long, global = true, default_value = "tizen")]
    format: String,

    /// TOML file with extra `[languages]` locale → tag mappings
    #[arg(long, global = true, value_name = "TOML")]
    lang_map: Option<PathBuf>,

    /// Generator identity written into file headers
    #[arg(long, global = true)]
    generator: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Write one localization file per language of a JSON model.
    GenerateAll {
        /// The JSON model to read
        model: PathBuf,
        /// The existing directory to write into
        dir: PathBuf,
    },

    /// Write a single localization file for one language.
    Generate {
        /// The JSON model to read
        model: PathBuf,
        /// The file to write
        file: PathBuf,
        /// Language tag (or locale code) to write
        #[arg(short, long)]
        lang: String,
    },

    /// Read every localization file in a directory into a JSON model.
    ConsumeAll {
        /// The JSON model to update
        model: PathBuf,
        /// The directory to scan
        dir: PathBuf,
        /// Where to save the updated model (defaults to MODEL)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Read a single localization file into a JSON model.
    Consume {
        /// The JSON model to update
        model: PathBuf,
        /// The file to read
        file: PathBuf,
        /// Language tag; inferred from the file path when omitted
        #[arg(short, long)]
        lang: Option<String>,
        /// Where to save the updated model (defaults to MODEL)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the locale → language tag table.
    Languages,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut options = GlobalOptions::new(args.format);
    if let Some(path) = args.lang_map {
        options = options.with_lang_map(path);
    }
    if let Some(generator) = args.generator {
        options = options.with_generator(generator);
    }

    let result = match args.commands {
        Commands::GenerateAll { model, dir } => run_generate_all_command(&options, &model, &dir),
        Commands::Generate { model, file, lang } => {
            run_generate_command(&options, &model, &file, &lang)
        }
        Commands::ConsumeAll { model, dir, output } => {
            run_consume_all_command(&options, &model, &dir, output.as_deref())
        }
        Commands::Consume {
            model,
            file,
            lang,
            output,
        } => run_consume_command(&options, &model, &file, lang.as_deref(), output.as_deref()),
        Commands::Languages => run_languages_command(&options),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
