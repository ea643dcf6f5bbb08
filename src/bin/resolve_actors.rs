use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use actorgraph::clustering::{combine, ActorStats, CombinedActor};
use actorgraph::environment::ResolverConfig;
use actorgraph::graph::{GroupReport, IdentityGraph};
use actorgraph::lexeme::{collect_misses, flatten_lexeme};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

const DICTIONARY_HELP: &str = "\
The bundled word list only covers common English and programming words. \
For better segmentation set \"dictionary_path\" in the JSON config to a full \
word list such as /usr/share/dict/words.";

#[derive(Parser)]
#[command(author, version, about, long_about = None, after_help = DICTIONARY_HELP)]
struct Cli {
    /// JSON config file, overrides ACTORGRAPH_CONFIG
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split an identifier into words
    Segment {
        /// Identifier such as an email local part or username
        lexeme: String,
    },

    /// Normalize one name and email into an actor record
    Parse {
        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long, default_value = "")]
        email: String,
    },

    /// Show every similarity signal between two identities
    Compare {
        #[arg(long, default_value = "")]
        name1: String,

        #[arg(long)]
        email1: String,

        #[arg(long, default_value = "")]
        name2: String,

        #[arg(long)]
        email2: String,
    },

    /// Resolve a file of `Name <email>` lines into canonical actors
    Resolve {
        file: PathBuf,

        /// Include the edges of every multi-member group
        #[arg(short, long)]
        report: bool,
    },

    /// List email local-part words missing from the dictionary and terms
    Misses { file: PathBuf },
}

#[derive(Serialize)]
struct SegmentOutput<'a> {
    words: Vec<String>,
    lexeme: &'a actorgraph::lexeme::Lexeme,
}

#[derive(Serialize)]
struct ResolveOutput {
    actors: Vec<CombinedActor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<Vec<GroupReport>>,
}

fn main() -> Result<()> {
    actorgraph::logging::configure_logging();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            let mut config = ResolverConfig::from_file(path)?;
            config.apply_overrides(|var| std::env::var(var).ok())?;
            config
        }
        None => ResolverConfig::from_env()?,
    };
    let parser = config.actor_parser()?;

    match cli.command {
        Commands::Segment { lexeme } => {
            let lexeme = parser.lexeme_parser().parse_lexeme(&lexeme);
            let output = SegmentOutput {
                words: flatten_lexeme(&lexeme, false),
                lexeme: &lexeme,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Parse { name, email } => {
            let actor = parser.parse_actor(&name, &email, config.name_from_email);
            println!("{}", serde_json::to_string_pretty(&actor)?);
        }

        Commands::Compare {
            name1,
            email1,
            name2,
            email2,
        } => {
            let a = parser.parse_actor(&name1, &email1, config.name_from_email);
            let b = parser.parse_actor(&name2, &email2, config.name_from_email);
            let similarity = config.evaluator().evaluate(&a, &b);
            println!("{}", serde_json::to_string_pretty(&similarity)?);
        }

        Commands::Resolve { file, report } => {
            let records = read_records(&file)?;

            let mut graph = IdentityGraph::new(config.evaluator());
            let mut stats: HashMap<String, ActorStats> = HashMap::new();
            for record in &records {
                let actor = parser.parse_actor(&record.name, &record.email, config.name_from_email);
                stats
                    .entry(actor.actor_id().to_string())
                    .and_modify(|existing| existing.absorb(record))
                    .or_insert_with(|| ActorStats {
                        actor_id: actor.actor_id().to_string(),
                        name: actor.name().to_string(),
                        email: actor.email().to_string(),
                        counts: record.counts.clone(),
                    });
                graph.add_actor(actor, true);
            }

            let actors = graph
                .group_similar_actors()
                .iter()
                .map(|cluster| combine(cluster, &stats))
                .collect::<Result<Vec<_>, _>>()?;
            info!(
                "Resolved {} records into {} actors",
                records.len(),
                actors.len()
            );

            let output = ResolveOutput {
                actors,
                report: report.then(|| graph.similarity_report()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Misses { file } => {
            let lexemes: Vec<_> = read_records(&file)?
                .iter()
                .filter_map(|record| record.email.split('@').next())
                .filter(|local_part| !local_part.is_empty())
                .map(|local_part| parser.lexeme_parser().parse_lexeme(local_part))
                .collect();
            println!("{}", serde_json::to_string_pretty(&collect_misses(&lexemes))?);
        }
    }

    Ok(())
}

fn read_records(file: &Path) -> Result<Vec<ActorStats>> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let record = ActorStats::parse_line(line)
            .with_context(|| format!("{}:{}", file.display(), index + 1))?;
        records.extend(record);
    }
    Ok(records)
}
