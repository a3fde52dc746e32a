//! Lightweight mode: decide the section sequence without writing copy.

use crate::app::AppContext;
use crate::app::commands::{ContentSource, resolve_content};
use crate::domain::{AppError, StructureDecision, normalize_structure};
use crate::ports::{ArticleFetcher, CompletionRequest, ModelClient, SectionStore};
use crate::services::{planner_system, structure_prompt, structure_schema};

#[derive(Debug, Clone)]
pub struct StructureOptions {
    pub source: ContentSource,
    pub use_summary_cards: bool,
}

#[derive(Debug)]
pub struct StructureResult {
    pub decision: StructureDecision,
    pub warnings: Vec<String>,
}

/// Execute the structure command.
pub fn execute<M, S, F>(
    ctx: &AppContext<M, S, F>,
    options: StructureOptions,
) -> Result<StructureResult, AppError>
where
    M: ModelClient,
    S: SectionStore,
    F: ArticleFetcher,
{
    let content = resolve_content(ctx, &options.source)?;
    let available = ctx.sections().available();

    let request = CompletionRequest {
        system: planner_system(&available),
        prompt: structure_prompt(&content, options.use_summary_cards),
        schema: structure_schema(),
    };
    let raw = ctx.model().complete(&request)?;

    let mut warnings = Vec::new();
    let decision =
        normalize_structure(raw, &available, options.use_summary_cards, &mut warnings)?;

    Ok(StructureResult { decision, warnings })
}
