//! Plan normalization.
//!
//! Takes a raw, possibly rule-violating decision from the model and rebuilds
//! it into one that satisfies every sequence and slot invariant. Recoverable
//! irregularities (unknown sections, missing slots, wrong order, undecodable
//! payloads) are corrected in place and reported as warnings; only shape
//! violations escape as errors.

use serde_json::Value;

use crate::domain::plan::{RawPlan, RawStructure};
use crate::domain::{
    AppError, BodyBlock, EmailPlan, HeroSlot, SectionId, SectionSlots, StructureDecision,
    SummaryCard,
};

/// Normalize a full-mode plan. `available` is the set of sections the caller
/// actually has templates for; ids outside it are dropped, not errored.
pub fn normalize_plan(
    raw: Value,
    available: &[SectionId],
    warnings: &mut Vec<String>,
) -> Result<EmailPlan, AppError> {
    let raw = RawPlan::from_value(raw)?;

    let slots = decode_slots(raw.slots, warnings);
    let mut sequence = filter_sequence(&raw.sequence, available, warnings);

    // Cards presence is keyed off the payload shape: an empty card list means
    // the section is not wanted, whatever the sequence says.
    let cards_wanted = !slots.six_summary_cards.is_empty();
    reorder(&mut sequence, cards_wanted, warnings);

    let mut slots = slots;
    if !cards_wanted {
        slots.six_summary_cards.clear();
    }

    Ok(EmailPlan {
        subject: raw.subject,
        preview: raw.preview,
        email_goal: raw.email_goal,
        sequence,
        slots,
    })
}

/// Normalize a lightweight structure decision. Summary-card intent comes from
/// the caller's explicit flag rather than any slot payload.
pub fn normalize_structure(
    raw: Value,
    available: &[SectionId],
    use_summary_cards: bool,
    warnings: &mut Vec<String>,
) -> Result<StructureDecision, AppError> {
    let raw = RawStructure::from_value(raw)?;

    let mut sequence = filter_sequence(&raw.sequence, available, warnings);
    reorder(&mut sequence, use_summary_cards, warnings);

    Ok(StructureDecision {
        sequence,
        email_goal: raw.email_goal,
        use_summary_cards,
        reasoning: raw.reasoning,
    })
}

fn filter_sequence(
    raw: &[String],
    available: &[SectionId],
    warnings: &mut Vec<String>,
) -> Vec<SectionId> {
    let mut sequence = Vec::with_capacity(raw.len());
    for name in raw {
        match SectionId::parse(name) {
            None => warnings.push(format!("dropping unknown section '{}'", name)),
            Some(id) if !available.contains(&id) => {
                warnings.push(format!("dropping section '{}': no template available", id));
            }
            Some(id) => sequence.push(id),
        }
    }
    sequence
}

/// Rebuild the sequence so the ordering invariants hold: hero first, footer
/// last, signature somewhere before footer, summary cards immediately after
/// simple-body when wanted and absent otherwise.
fn reorder(sequence: &mut Vec<SectionId>, cards_wanted: bool, warnings: &mut Vec<String>) {
    let before = sequence.clone();

    sequence.retain(|s| *s != SectionId::Hero);
    sequence.insert(0, SectionId::Hero);

    sequence.retain(|s| *s != SectionId::Footer);
    sequence.push(SectionId::Footer);

    // Footer is now last, so any surviving signature already precedes it and
    // is left untouched; adjacency to the footer is not forced.
    let footer_idx = sequence.len() - 1;
    if !sequence[..footer_idx].contains(&SectionId::Signature) {
        sequence.insert(footer_idx, SectionId::Signature);
    }

    place_summary_cards(sequence, cards_wanted);

    if *sequence != before {
        warnings.push("reordered sequence to satisfy section placement rules".to_string());
    }
}

fn place_summary_cards(sequence: &mut Vec<SectionId>, wanted: bool) {
    if !wanted {
        sequence.retain(|s| *s != SectionId::SixSummaryCards);
        return;
    }

    // No simple-body means no anchor point; leave the sequence alone rather
    // than inventing a position.
    let Some(body_idx) = sequence.iter().position(|s| *s == SectionId::SimpleBody) else {
        return;
    };

    match sequence.iter().position(|s| *s == SectionId::SixSummaryCards) {
        Some(idx) if idx == body_idx + 1 => {}
        Some(_) => {
            sequence.retain(|s| *s != SectionId::SixSummaryCards);
            let body_idx = sequence
                .iter()
                .position(|s| *s == SectionId::SimpleBody)
                .expect("simple-body survives retain");
            sequence.insert(body_idx + 1, SectionId::SixSummaryCards);
        }
        None => sequence.insert(body_idx + 1, SectionId::SixSummaryCards),
    }
}

/// Decode the raw slots object into typed payloads, normalizing underscore
/// keys to their hyphen equivalents and defaulting anything absent. Unknown
/// keys are kept verbatim.
fn decode_slots(
    raw: serde_json::Map<String, Value>,
    warnings: &mut Vec<String>,
) -> SectionSlots {
    let mut slots = SectionSlots::default();

    for (key, value) in raw {
        match SectionId::parse(&key) {
            Some(SectionId::Hero) => match serde_json::from_value::<HeroSlot>(value) {
                Ok(hero) => slots.hero = hero,
                Err(err) => warnings.push(format!("ignoring undecodable hero slot: {}", err)),
            },
            Some(SectionId::SimpleBody) => match decode_body_blocks(&value) {
                Some(blocks) => slots.simple_body = blocks,
                None => warnings.push("ignoring undecodable simple-body slot".to_string()),
            },
            Some(SectionId::SixSummaryCards) => {
                match serde_json::from_value::<Vec<SummaryCard>>(value) {
                    Ok(cards) => slots.six_summary_cards = cards,
                    Err(err) => {
                        warnings.push(format!("ignoring undecodable six-summary-cards slot: {}", err))
                    }
                }
            }
            Some(SectionId::BookACall) => slots.book_a_call = object_or_empty(value),
            Some(SectionId::Contact) => slots.contact = object_or_empty(value),
            Some(SectionId::Signature) => slots.signature = object_or_empty(value),
            Some(SectionId::Footer) => slots.footer = object_or_empty(value),
            Some(other) => {
                // Known section with no payload of its own; keep whatever the
                // model sent under the canonical key.
                slots.extra.insert(other.as_str().to_string(), value);
            }
            None => {
                slots.extra.insert(key, value);
            }
        }
    }

    slots
}

/// Body blocks arrive either as `{html}` objects or, from sloppier outputs,
/// as bare strings. Anything else makes the whole slot undecodable.
fn decode_body_blocks(value: &Value) -> Option<Vec<BodyBlock>> {
    let arr = value.as_array()?;
    let mut blocks = Vec::with_capacity(arr.len());
    for entry in arr {
        if let Some(html) = entry.as_str() {
            blocks.push(BodyBlock { html: html.to_string() });
        } else if let Some(html) = entry.get("html").and_then(Value::as_str) {
            blocks.push(BodyBlock { html: html.to_string() });
        } else {
            return None;
        }
    }
    Some(blocks)
}

fn object_or_empty(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}
