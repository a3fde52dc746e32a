mod blog;
mod config;
mod error;
mod links;
mod normalize;
mod plan;
mod section;
mod slug;

pub use blog::BlogContent;
pub use config::{AppConfig, ModelConfig, OutputConfig};
pub use error::AppError;
pub use links::{LinkDirectory, enforce_cta};
pub use normalize::{normalize_plan, normalize_structure};
pub use plan::{BodyBlock, EmailPlan, HeroSlot, SectionSlots, StructureDecision, SummaryCard};
pub use section::{SectionCategory, SectionId};
pub use slug::{artifact_basename, slugify};
