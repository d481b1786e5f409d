use std::path::PathBuf;

use clap::{Parser, Subcommand};
use peyv::content::{AudioManifest, Catalog, audio_slug};
use peyv::model::FileStore;

#[derive(Parser, Debug)]
#[command(about = "Ops tool for the Peyv learning backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect the lesson catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },

    /// Inspect or clear learner progress
    Progress {
        #[command(subcommand)]
        action: ProgressCommands,
    },

    /// Audit audio assets
    Audio {
        #[command(subcommand)]
        action: AudioCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List every lesson with its tracking parameters
    List,
    /// Dump one lesson's vocabulary deck
    Show {
        #[arg(long)]
        lesson: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProgressCommands {
    /// Print a learner's stored records
    Show {
        #[arg(long)]
        learner: String,
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
    },
    /// Drop every record for a learner
    Clear {
        #[arg(long)]
        learner: String,
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum AudioCommands {
    /// Print the clip filename a word maps to
    Slug { text: String },
    /// List catalog words with no recorded clip
    Check {
        #[arg(long, default_value = "./audio")]
        assets_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let catalog = match Catalog::bundled() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("broken bundled catalog: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogCommands::List => {
                for lesson in catalog.lessons() {
                    let config = lesson.config();
                    let practice = match config.pass_threshold() {
                        Some(threshold) => format!("practice, pass at {threshold}%"),
                        None => String::from("audio-only"),
                    };
                    println!(
                        "{:<12} {:<40} {} clips, {}",
                        lesson.id(),
                        lesson.title(),
                        config.total_audios(),
                        practice
                    );
                }
            }
            CatalogCommands::Show { lesson } => {
                let Some(lesson) = catalog.lesson(&lesson) else {
                    eprintln!("no such lesson: {lesson}");
                    std::process::exit(1);
                };
                let deck = catalog.deck(lesson.category()).unwrap_or_default();
                for entry in deck {
                    println!("{:<16} {}", entry.ku, entry.en);
                }
            }
        },

        Commands::Progress { action } => match action {
            ProgressCommands::Show { learner, data_dir } => {
                let store = FileStore::new(data_dir);
                match store.load_all(&learner).await {
                    Ok(records) if records.is_empty() => println!("no records for {learner}"),
                    Ok(records) => {
                        for record in records.values() {
                            println!(
                                "{:<12} {:>3}% {:?} (score {:?}, {} min)",
                                record.lesson_id(),
                                record.progress(),
                                record.status(),
                                record.score(),
                                record.time_spent()
                            );
                        }
                    }
                    Err(e) => {
                        eprintln!("unable to read progress: {e}");
                        std::process::exit(1);
                    }
                }
            }
            ProgressCommands::Clear { learner, data_dir } => {
                let store = FileStore::new(data_dir);
                if let Err(e) = store.clear(&learner).await {
                    eprintln!("unable to clear progress: {e}");
                    std::process::exit(1);
                }
                println!("cleared progress for {learner}");
            }
        },

        Commands::Audio { action } => match action {
            AudioCommands::Slug { text } => {
                println!("{}.mp3", audio_slug(&text));
            }
            AudioCommands::Check { assets_dir } => {
                let manifest = match AudioManifest::scan(&assets_dir) {
                    Ok(manifest) => manifest,
                    Err(e) => {
                        eprintln!("unable to scan {}: {e}", assets_dir.display());
                        std::process::exit(1);
                    }
                };

                let mut missing = 0usize;
                for lesson in catalog.lessons() {
                    for entry in catalog.deck(lesson.category()).unwrap_or_default() {
                        if manifest.resolve(&entry.ku).is_none() {
                            println!("{:<12} {:<16} -> {}.mp3", lesson.id(), entry.ku, audio_slug(&entry.ku));
                            missing += 1;
                        }
                    }
                }
                println!("{missing} words without clips");
            }
        },
    }
}
