//! mailforge: Assemble modular marketing emails from blog content.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};

use app::{
    AppContext,
    commands::{generate, sections, structure},
};
use domain::AppConfig;
use services::{DirSectionStore, EmbeddedSectionStore, HttpArticleFetcher, HttpModelClient};

pub use app::commands::ContentSource;
pub use app::commands::generate::GenerateResult;
pub use app::commands::sections::SectionListing;
pub use app::commands::structure::StructureResult;
pub use domain::AppError;

/// CLI-level overrides applied on top of `mailforge.toml`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub sections_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub model: Option<String>,
    pub fallback_model: Option<String>,
}

fn load_config(overrides: &Overrides) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load(Path::new("."))?;
    if let Some(model) = &overrides.model {
        config.model.planner = model.clone();
    }
    if let Some(fallback) = &overrides.fallback_model {
        config.model.fallback = fallback.clone();
    }
    Ok(config)
}

fn report_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

/// Generate a complete email from one content source and write both
/// artifacts to the output directory.
pub fn generate(source: ContentSource, overrides: &Overrides) -> Result<GenerateResult, AppError> {
    let config = load_config(overrides)?;
    let out_dir =
        overrides.out_dir.clone().unwrap_or_else(|| PathBuf::from(&config.output.dir));

    let model = HttpModelClient::from_env(&config.model)?;
    let fetcher = HttpArticleFetcher::new(config.model.timeout_secs)?;
    let options = generate::GenerateOptions { source, out_dir };

    let result = match &overrides.sections_dir {
        Some(dir) => {
            let ctx = AppContext::new(model, DirSectionStore::new(dir.clone()), fetcher);
            generate::execute(&ctx, options)?
        }
        None => {
            let ctx = AppContext::new(model, EmbeddedSectionStore::new(), fetcher);
            generate::execute(&ctx, options)?
        }
    };

    report_warnings(&result.warnings);
    println!("✅ Wrote {}", result.artifacts.html_path.display());
    println!("✅ Wrote {}", result.artifacts.text_path.display());
    Ok(result)
}

/// Run lightweight mode: print the planned section sequence and goal without
/// generating copy or writing artifacts.
pub fn structure(
    source: ContentSource,
    use_summary_cards: bool,
    overrides: &Overrides,
) -> Result<StructureResult, AppError> {
    let config = load_config(overrides)?;
    let model = HttpModelClient::from_env(&config.model)?;
    let fetcher = HttpArticleFetcher::new(config.model.timeout_secs)?;
    let options = structure::StructureOptions { source, use_summary_cards };

    let result = match &overrides.sections_dir {
        Some(dir) => {
            let ctx = AppContext::new(model, DirSectionStore::new(dir.clone()), fetcher);
            structure::execute(&ctx, options)?
        }
        None => {
            let ctx = AppContext::new(model, EmbeddedSectionStore::new(), fetcher);
            structure::execute(&ctx, options)?
        }
    };

    report_warnings(&result.warnings);
    let decision = &result.decision;
    println!("Goal: {}", decision.email_goal);
    println!("Sequence:");
    for id in &decision.sequence {
        println!("  {}", id);
    }
    if !decision.reasoning.is_empty() {
        println!("Reasoning: {}", decision.reasoning);
    }
    Ok(result)
}

/// List the section catalog and template availability.
pub fn list_sections(sections_dir: Option<&Path>) -> Vec<SectionListing> {
    let listings = match sections_dir {
        Some(dir) => sections::execute(&DirSectionStore::new(dir.to_path_buf())),
        None => sections::execute(&EmbeddedSectionStore::new()),
    };

    for listing in &listings {
        let marker = if listing.available { "" } else { "  (missing template)" };
        println!("{:<28} [{}] {}{}", listing.id, listing.category, listing.summary, marker);
    }
    listings
}
