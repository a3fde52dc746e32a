//! Catalog listing.

use crate::domain::SectionId;
use crate::ports::SectionStore;

/// One catalog row.
#[derive(Debug, Clone)]
pub struct SectionListing {
    pub id: SectionId,
    pub category: &'static str,
    pub summary: &'static str,
    pub available: bool,
}

/// List every catalogued section and whether its template is present.
pub fn execute<S: SectionStore>(store: &S) -> Vec<SectionListing> {
    let available = store.available();
    SectionId::ALL
        .into_iter()
        .map(|id| SectionListing {
            id,
            category: id.category().display_name(),
            summary: id.summary(),
            available: available.contains(&id),
        })
        .collect()
}
