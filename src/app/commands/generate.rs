//! Full pipeline: retrieve, plan, enforce, assemble, write.

use std::path::PathBuf;

use chrono::Utc;

use crate::app::AppContext;
use crate::app::commands::{ContentSource, resolve_content};
use crate::domain::{AppError, SectionId, enforce_cta, normalize_plan};
use crate::ports::{ArticleFetcher, CompletionRequest, ModelClient, SectionStore};
use crate::services::{
    WrittenArtifacts, assemble, plan_prompt, plan_schema, planner_system, write_artifacts,
};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub source: ContentSource,
    pub out_dir: PathBuf,
}

#[derive(Debug)]
pub struct GenerateResult {
    pub subject: String,
    pub sequence: Vec<SectionId>,
    pub artifacts: WrittenArtifacts,
    pub warnings: Vec<String>,
}

/// Execute the generate command.
pub fn execute<M, S, F>(
    ctx: &AppContext<M, S, F>,
    options: GenerateOptions,
) -> Result<GenerateResult, AppError>
where
    M: ModelClient,
    S: SectionStore,
    F: ArticleFetcher,
{
    let started_at = Utc::now();
    let content = resolve_content(ctx, &options.source)?;
    let available = ctx.sections().available();

    let request = CompletionRequest {
        system: planner_system(&available),
        prompt: plan_prompt(&content),
        schema: plan_schema(),
    };
    let raw = ctx.model().complete(&request)?;

    let mut warnings = Vec::new();
    let mut plan = normalize_plan(raw, &available, &mut warnings)?;
    enforce_cta(&mut plan.slots.hero, &plan.sequence, &plan.email_goal, &mut warnings);

    let email = assemble(&plan, ctx.sections(), &mut warnings);
    let artifacts = write_artifacts(&options.out_dir, &plan.subject, started_at, &email)?;

    Ok(GenerateResult { subject: plan.subject, sequence: plan.sequence, artifacts, warnings })
}
