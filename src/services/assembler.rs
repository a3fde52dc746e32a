//! Section assembly.
//!
//! Renders a finalized plan into the two output artifacts. Dynamic sections
//! with copy go through the template engine; everything else passes through
//! verbatim. A fragment that fails to render falls back to its raw template;
//! partial degradation beats losing the whole email.

use std::sync::OnceLock;

use minijinja::{AutoEscape, Environment, context};

use crate::domain::{EmailPlan, SectionId};
use crate::ports::SectionStore;
use crate::services::html_text::html_to_plain_text;

/// Final HTML email plus its plain-text companion.
#[derive(Debug, Clone)]
pub struct AssembledEmail {
    pub html: String,
    pub text: String,
}

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn environment() -> &'static Environment<'static> {
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env
    })
}

/// Render the plan against the store's templates, in sequence order.
pub fn assemble<S: SectionStore>(
    plan: &EmailPlan,
    store: &S,
    warnings: &mut Vec<String>,
) -> AssembledEmail {
    let mut html = String::new();
    html.push_str(&store.wrapper_open());
    html.push_str(&preheader(&plan.preview));

    for id in &plan.sequence {
        let Some(template) = store.template(*id) else {
            warnings.push(format!("skipping section '{}': no template available", id));
            continue;
        };

        let fragment = render_section(*id, &template, plan, warnings);
        if fragment.trim().is_empty() {
            continue;
        }
        html.push_str(&fragment);
        if !fragment.ends_with('\n') {
            html.push('\n');
        }
    }

    html.push_str(&store.wrapper_close());

    let text = html_to_plain_text(&html);
    AssembledEmail { html, text }
}

fn render_section(
    id: SectionId,
    template: &str,
    plan: &EmailPlan,
    warnings: &mut Vec<String>,
) -> String {
    let env = environment();
    let rendered = match id {
        SectionId::Hero if !plan.slots.hero.is_empty() => {
            let hero = &plan.slots.hero;
            env.render_str(
                template,
                context! {
                    title => hero.title,
                    subtitle => hero.subtitle,
                    cta_text => hero.cta_text,
                    cta_url => hero.cta_url,
                },
            )
        }
        SectionId::SimpleBody if !plan.slots.simple_body.is_empty() => {
            env.render_str(template, context! { blocks => plan.slots.simple_body })
        }
        SectionId::SixSummaryCards if !plan.slots.six_summary_cards.is_empty() => {
            env.render_str(template, context! { cards => plan.slots.six_summary_cards })
        }
        // Static sections, and dynamic sections without copy, pass through.
        _ => return template.to_string(),
    };

    match rendered {
        Ok(fragment) => fragment,
        Err(err) => {
            warnings.push(format!(
                "section '{}' failed to render ({}); using raw template",
                id, err
            ));
            template.to_string()
        }
    }
}

/// Hidden preview text shown by inbox clients next to the subject.
fn preheader(preview: &str) -> String {
    if preview.is_empty() {
        return String::new();
    }
    format!(
        "    <div style=\"display: none; max-height: 0; overflow: hidden;\">{}</div>\n",
        escape_html(preview)
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BodyBlock, HeroSlot, SectionSlots, SummaryCard};
    use crate::services::EmbeddedSectionStore;

    fn base_plan() -> EmailPlan {
        EmailPlan {
            subject: "Subject".to_string(),
            preview: "Preview line".to_string(),
            email_goal: String::new(),
            sequence: vec![
                SectionId::Hero,
                SectionId::SimpleBody,
                SectionId::Signature,
                SectionId::Footer,
            ],
            slots: SectionSlots {
                hero: HeroSlot {
                    title: "Big news".to_string(),
                    subtitle: "Small print".to_string(),
                    cta_text: "Read it".to_string(),
                    cta_url: "https://lumail.io/blog".to_string(),
                },
                simple_body: vec![BodyBlock { html: "<p>First paragraph.</p>".to_string() }],
                ..SectionSlots::default()
            },
        }
    }

    #[test]
    fn dynamic_sections_receive_generated_copy() {
        let mut warnings = Vec::new();
        let email = assemble(&base_plan(), &EmbeddedSectionStore::new(), &mut warnings);
        assert!(email.html.contains("Big news"));
        assert!(email.html.contains("https://lumail.io/blog"));
        assert!(email.html.contains("<p>First paragraph.</p>"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn static_sections_pass_through_verbatim() {
        let mut warnings = Vec::new();
        let email = assemble(&base_plan(), &EmbeddedSectionStore::new(), &mut warnings);
        assert!(email.html.contains("The Lumail team"));
        assert!(email.html.contains("Unsubscribe"));
    }

    #[test]
    fn hero_copy_is_escaped() {
        let mut plan = base_plan();
        plan.slots.hero.title = "Ship <fast> & safe".to_string();
        let email = assemble(&plan, &EmbeddedSectionStore::new(), &mut Vec::new());
        assert!(email.html.contains("Ship &lt;fast&gt; &amp; safe"));
    }

    #[test]
    fn empty_hero_slot_renders_raw_template() {
        let mut plan = base_plan();
        plan.slots.hero = HeroSlot::default();
        let email = assemble(&plan, &EmbeddedSectionStore::new(), &mut Vec::new());
        assert!(email.html.contains("{{ title }}"));
    }

    #[test]
    fn cards_render_in_pairs() {
        let mut plan = base_plan();
        plan.sequence.insert(2, SectionId::SixSummaryCards);
        plan.slots.six_summary_cards = (0..6)
            .map(|i| SummaryCard {
                title: format!("Takeaway {}", i),
                description: "because".to_string(),
                emoji: "✨".to_string(),
            })
            .collect();
        let email = assemble(&plan, &EmbeddedSectionStore::new(), &mut Vec::new());
        assert!(email.html.contains("Takeaway 0"));
        assert!(email.html.contains("Takeaway 5"));
    }

    #[test]
    fn malformed_template_falls_back_to_raw() {
        struct BrokenStore;
        impl SectionStore for BrokenStore {
            fn template(&self, id: SectionId) -> Option<String> {
                match id {
                    SectionId::Hero => Some("<tr>{{ title".to_string()),
                    _ => Some("<tr><td>static</td></tr>".to_string()),
                }
            }
            fn wrapper_open(&self) -> String {
                "<table>".to_string()
            }
            fn wrapper_close(&self) -> String {
                "</table>".to_string()
            }
        }

        let mut warnings = Vec::new();
        let email = assemble(&base_plan(), &BrokenStore, &mut warnings);
        assert!(email.html.contains("<tr>{{ title"));
        assert!(warnings.iter().any(|w| w.contains("failed to render")));
    }

    #[test]
    fn missing_template_is_skipped_with_warning() {
        struct SparseStore;
        impl SectionStore for SparseStore {
            fn template(&self, id: SectionId) -> Option<String> {
                (id != SectionId::Signature).then(|| "<tr><td>x</td></tr>".to_string())
            }
            fn wrapper_open(&self) -> String {
                "<table>".to_string()
            }
            fn wrapper_close(&self) -> String {
                "</table>".to_string()
            }
        }

        let mut warnings = Vec::new();
        assemble(&base_plan(), &SparseStore, &mut warnings);
        assert!(warnings.iter().any(|w| w.contains("signature")));
    }

    #[test]
    fn plain_text_is_readable_and_linkless() {
        let mut warnings = Vec::new();
        let email = assemble(&base_plan(), &EmbeddedSectionStore::new(), &mut warnings);
        assert!(email.text.contains("Big news"));
        assert!(email.text.contains("First paragraph."));
        assert!(email.text.contains("Preview line"));
        assert!(!email.text.contains("<p>"));
        assert!(!email.text.contains("href"));
    }
}
