//! Approved-link directory and hero CTA enforcement.

use crate::domain::{HeroSlot, SectionId};

/// Fixed allow-list of destinations a call-to-action may point to. The model
/// is instructed to pick only from this set; anything else is replaced.
pub struct LinkDirectory;

impl LinkDirectory {
    pub const BUILDER: &'static str = "https://lumail.io/builder";
    pub const BOOK_CALL: &'static str = "https://lumail.io/book-a-call";
    pub const HOMEPAGE: &'static str = "https://lumail.io";
    pub const BLOG: &'static str = "https://lumail.io/blog";

    pub const ALL: [&'static str; 4] =
        [Self::BUILDER, Self::BOOK_CALL, Self::HOMEPAGE, Self::BLOG];

    pub fn is_allowed(url: &str) -> bool {
        Self::ALL.contains(&url)
    }
}

/// Guarantee the hero CTA points at an approved destination. A disallowed URL
/// is replaced with a deterministic fallback; the substitution is reported as
/// a warning, never a failure.
pub fn enforce_cta(
    hero: &mut HeroSlot,
    sequence: &[SectionId],
    email_goal: &str,
    warnings: &mut Vec<String>,
) {
    if LinkDirectory::is_allowed(&hero.cta_url) {
        return;
    }

    let fallback = fallback_link(sequence, email_goal);
    warnings.push(format!(
        "replacing disallowed CTA URL '{}' with {}",
        hero.cta_url, fallback
    ));
    hero.cta_url = fallback.to_string();
}

/// Fixed decision order for choosing a replacement destination. Goal matching
/// is a lower-cased substring check.
fn fallback_link(sequence: &[SectionId], email_goal: &str) -> &'static str {
    let goal = email_goal.to_lowercase();

    if sequence.contains(&SectionId::BookACall) || goal.contains("consult") {
        return LinkDirectory::BOOK_CALL;
    }
    if sequence.contains(&SectionId::SellingPoints)
        || goal.contains("product")
        || goal.contains("promo")
        || goal.contains("sale")
    {
        return LinkDirectory::BUILDER;
    }
    if goal.contains("educat") || goal.contains("guide") || goal.contains("blog") {
        return LinkDirectory::BLOG;
    }
    LinkDirectory::HOMEPAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_with(url: &str) -> HeroSlot {
        HeroSlot {
            title: "T".to_string(),
            subtitle: "S".to_string(),
            cta_text: "Go".to_string(),
            cta_url: url.to_string(),
        }
    }

    #[test]
    fn allowed_urls_pass_unchanged() {
        for url in LinkDirectory::ALL {
            let mut hero = hero_with(url);
            let mut warnings = Vec::new();
            enforce_cta(&mut hero, &[], "", &mut warnings);
            assert_eq!(hero.cta_url, url);
            assert!(warnings.is_empty());
        }
    }

    #[test]
    fn book_a_call_section_routes_to_booking_link() {
        let mut hero = hero_with("https://evil.example.com");
        let mut warnings = Vec::new();
        enforce_cta(
            &mut hero,
            &[SectionId::Hero, SectionId::BookACall, SectionId::Footer],
            "",
            &mut warnings,
        );
        assert_eq!(hero.cta_url, LinkDirectory::BOOK_CALL);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn consult_goal_routes_to_booking_link() {
        let mut hero = hero_with("https://evil.example.com");
        enforce_cta(&mut hero, &[], "Get readers to book a consultation", &mut Vec::new());
        assert_eq!(hero.cta_url, LinkDirectory::BOOK_CALL);
    }

    #[test]
    fn product_goal_routes_to_builder() {
        let mut hero = hero_with("https://bad.example");
        enforce_cta(&mut hero, &[], "Promo for the spring sale", &mut Vec::new());
        assert_eq!(hero.cta_url, LinkDirectory::BUILDER);

        let mut hero = hero_with("https://bad.example");
        enforce_cta(&mut hero, &[SectionId::SellingPoints], "", &mut Vec::new());
        assert_eq!(hero.cta_url, LinkDirectory::BUILDER);
    }

    #[test]
    fn educational_goal_routes_to_blog() {
        let mut hero = hero_with("https://bad.example");
        enforce_cta(&mut hero, &[], "Educate subscribers with a guide", &mut Vec::new());
        assert_eq!(hero.cta_url, LinkDirectory::BLOG);
    }

    #[test]
    fn default_fallback_is_homepage() {
        let mut hero = hero_with("https://bad.example");
        enforce_cta(&mut hero, &[SectionId::Hero, SectionId::Footer], "say hello", &mut Vec::new());
        assert_eq!(hero.cta_url, LinkDirectory::HOMEPAGE);
    }

    #[test]
    fn enforcement_is_deterministic() {
        let sequence = [SectionId::Hero, SectionId::BookACall, SectionId::Footer];
        for _ in 0..3 {
            let mut hero = hero_with("https://evil.example.com");
            enforce_cta(&mut hero, &sequence, "", &mut Vec::new());
            assert_eq!(hero.cta_url, LinkDirectory::BOOK_CALL);
        }
    }

    #[test]
    fn other_hero_fields_pass_through() {
        let mut hero = hero_with("https://bad.example");
        enforce_cta(&mut hero, &[], "", &mut Vec::new());
        assert_eq!(hero.title, "T");
        assert_eq!(hero.subtitle, "S");
        assert_eq!(hero.cta_text, "Go");
    }
}
