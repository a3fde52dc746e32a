//! Prompt and response-schema construction for the planner.

use serde_json::{Value, json};

use crate::domain::{BlogContent, LinkDirectory, SectionId};

static BRAND_GUIDELINES: &str = include_str!("../assets/brand/guidelines.md");

/// Catalog description handed to the model: one line per available section.
fn catalog_block(available: &[SectionId]) -> String {
    available
        .iter()
        .map(|id| format!("- `{}` [{}]: {}", id, id.category().display_name(), id.summary()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn content_block(content: &BlogContent) -> String {
    let source = content
        .source_url
        .as_ref()
        .map(|url| format!("\nSource: {}", url))
        .unwrap_or_default();
    format!("# {}{}\n\n{}", content.title, source, content.text)
}

/// System prompt shared by both planning modes.
pub fn planner_system(available: &[SectionId]) -> String {
    format!(
        "You plan outbound marketing emails for Lumail. Follow the brand \
guidelines exactly.\n\n{}\n\n## Available sections\n\n{}\n\n## Rules\n\n\
- Use only section ids from the list above.\n\
- Use underscore naming for slot keys (e.g. `simple_body`).\n\
- The hero CTA URL must be one of the approved links: {}.\n\
- Do not introduce URLs anywhere in body HTML.\n\
- Body HTML may use only <p>, <ul>, <ol>, <li>, <strong> and <em> tags.",
        BRAND_GUIDELINES,
        catalog_block(available),
        LinkDirectory::ALL.join(", ")
    )
}

/// User prompt for full-plan mode.
pub fn plan_prompt(content: &BlogContent) -> String {
    format!(
        "Plan a complete marketing email for the blog post below: subject, \
preview text, section sequence, and copy for every dynamic section. Include \
the six summary cards only when the post has six distinct takeaways worth \
recapping; otherwise return an empty card list.\n\n{}",
        content_block(content)
    )
}

/// User prompt for lightweight structure-only mode.
pub fn structure_prompt(content: &BlogContent, use_summary_cards: bool) -> String {
    let cards_note = if use_summary_cards {
        "The summary-cards section is wanted; place it after the body."
    } else {
        "Do not include the summary-cards section."
    };
    format!(
        "Decide which sections this email should use and in what order, and \
state the email's goal in one sentence. {}\n\n{}",
        cards_note,
        content_block(content)
    )
}

/// Response schema for full-plan mode.
pub fn plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "subject": { "type": "string" },
            "preview": { "type": "string" },
            "email_goal": { "type": "string" },
            "sequence": { "type": "array", "items": { "type": "string" } },
            "slots": {
                "type": "object",
                "properties": {
                    "hero": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "subtitle": { "type": "string" },
                            "cta_text": { "type": "string" },
                            "cta_url": { "type": "string" }
                        },
                        "required": ["title", "subtitle", "cta_text", "cta_url"],
                        "additionalProperties": false
                    },
                    "simple_body": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": { "html": { "type": "string" } },
                            "required": ["html"],
                            "additionalProperties": false
                        }
                    },
                    "six_summary_cards": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "title": { "type": "string" },
                                "description": { "type": "string" },
                                "emoji": { "type": "string" }
                            },
                            "required": ["title", "description", "emoji"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["hero", "simple_body", "six_summary_cards"],
                "additionalProperties": true
            }
        },
        "required": ["subject", "preview", "email_goal", "sequence", "slots"],
        "additionalProperties": false
    })
}

/// Response schema for structure-only mode.
pub fn structure_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "sequence": { "type": "array", "items": { "type": "string" } },
            "email_goal": { "type": "string" },
            "use_summary_cards": { "type": "boolean" },
            "reasoning": { "type": "string" }
        },
        "required": ["sequence", "email_goal", "use_summary_cards", "reasoning"],
        "additionalProperties": false
    })
}
