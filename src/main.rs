use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mailforge::{AppError, ContentSource, Overrides};
use url::Url;

#[derive(Parser)]
#[command(name = "mailforge")]
#[command(version)]
#[command(
    about = "Assemble modular marketing emails from blog content",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a complete email and write HTML + plain-text artifacts
    #[clap(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Plan the section sequence only, without generating copy
    #[clap(visible_alias = "st")]
    Structure {
        #[command(flatten)]
        source: SourceArgs,
        /// Request the six-summary-cards section after the body
        #[arg(long)]
        summary_cards: bool,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// List the section catalog and template availability
    Sections {
        /// Directory of section templates overriding the embedded set
        #[arg(long, value_name = "DIR")]
        sections_dir: Option<PathBuf>,
    },
}

/// Exactly one content source per run.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Blog post URL to fetch and extract
    #[arg(long)]
    url: Option<Url>,
    /// Raw blog post text (first line becomes the title)
    #[arg(long)]
    text: Option<String>,
    /// Free-text brief to write from
    #[arg(long)]
    prompt: Option<String>,
}

impl SourceArgs {
    fn into_content_source(self) -> ContentSource {
        match (self.url, self.text, self.prompt) {
            (Some(url), _, _) => ContentSource::Url(url),
            (_, Some(text), _) => ContentSource::Text(text),
            (_, _, Some(prompt)) => ContentSource::Prompt(prompt),
            _ => unreachable!("clap enforces exactly one source"),
        }
    }
}

#[derive(Args)]
struct OverrideArgs {
    /// Directory of section templates overriding the embedded set
    #[arg(long, value_name = "DIR")]
    sections_dir: Option<PathBuf>,
    /// Output directory for the generated artifacts
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
    /// Planner model identifier
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,
    /// Model substituted on the retry after a transient failure
    #[arg(long, value_name = "MODEL")]
    fallback_model: Option<String>,
}

impl OverrideArgs {
    fn into_overrides(self) -> Overrides {
        Overrides {
            sections_dir: self.sections_dir,
            out_dir: self.out_dir,
            model: self.model,
            fallback_model: self.fallback_model,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Generate { source, overrides } => {
            mailforge::generate(source.into_content_source(), &overrides.into_overrides())
                .map(|_| ())
        }
        Commands::Structure { source, summary_cards, overrides } => mailforge::structure(
            source.into_content_source(),
            summary_cards,
            &overrides.into_overrides(),
        )
        .map(|_| ()),
        Commands::Sections { sections_dir } => {
            mailforge::list_sections(sections_dir.as_deref());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
