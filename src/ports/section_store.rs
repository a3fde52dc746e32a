use crate::domain::SectionId;

/// Boundary to the section template files.
pub trait SectionStore {
    /// The HTML fragment for a section, or `None` when the template file is
    /// missing. A missing file means "section unavailable", never an error.
    fn template(&self, id: SectionId) -> Option<String>;

    /// Markup preceding the first section.
    fn wrapper_open(&self) -> String;

    /// Markup following the last section.
    fn wrapper_close(&self) -> String;

    /// Catalog entries that actually have a template on disk.
    fn available(&self) -> Vec<SectionId> {
        SectionId::ALL.into_iter().filter(|id| self.template(*id).is_some()).collect()
    }
}
