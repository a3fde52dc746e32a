use std::fmt;

/// The modular building blocks an email can be assembled from.
///
/// Each variant corresponds to one on-disk HTML fragment. String forms using
/// underscores (as the model is prompted to emit for slot keys) parse to the
/// same variant as the hyphenated template name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    /// Opening headline, subtitle, and call-to-action button.
    Hero,
    /// Free-form body copy, rendered as a run of HTML blocks.
    SimpleBody,
    /// Grid of six title/description/emoji cards summarizing the post.
    SixSummaryCards,
    /// Static product pitch listing what a subscription includes.
    SellingPoints,
    /// Static customer quote.
    TestimonialQuote,
    /// Static consultation booking banner.
    BookACall,
    /// Static contact details block.
    Contact,
    /// Static sender sign-off.
    Signature,
    /// Static legal footer with unsubscribe link.
    Footer,
}

/// Broad grouping used to describe sections to the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionCategory {
    General,
    Educational,
    Product,
    SocialProof,
    GeneralCta,
}

impl SectionCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionCategory::General => "General",
            SectionCategory::Educational => "Educational",
            SectionCategory::Product => "Product",
            SectionCategory::SocialProof => "Social Proof",
            SectionCategory::GeneralCta => "General CTA",
        }
    }
}

impl SectionId {
    /// All catalogued sections in their natural email order.
    pub const ALL: [SectionId; 9] = [
        SectionId::Hero,
        SectionId::SimpleBody,
        SectionId::SixSummaryCards,
        SectionId::SellingPoints,
        SectionId::TestimonialQuote,
        SectionId::BookACall,
        SectionId::Contact,
        SectionId::Signature,
        SectionId::Footer,
    ];

    /// Canonical id, matching the template file name (minus extension).
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::SimpleBody => "simple-body",
            SectionId::SixSummaryCards => "six-summary-cards",
            SectionId::SellingPoints => "selling-points-what-you-get",
            SectionId::TestimonialQuote => "testimonial-quote",
            SectionId::BookACall => "book-a-call",
            SectionId::Contact => "contact",
            SectionId::Signature => "signature",
            SectionId::Footer => "footer",
        }
    }

    /// Parse a section id from either the hyphenated template name or the
    /// underscore form the model uses for slot keys. Unknown names yield
    /// `None`; callers drop them rather than erroring.
    pub fn parse(name: &str) -> Option<SectionId> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "hero" => Some(SectionId::Hero),
            "simple-body" => Some(SectionId::SimpleBody),
            "six-summary-cards" => Some(SectionId::SixSummaryCards),
            "selling-points-what-you-get" => Some(SectionId::SellingPoints),
            "testimonial-quote" => Some(SectionId::TestimonialQuote),
            "book-a-call" => Some(SectionId::BookACall),
            "contact" => Some(SectionId::Contact),
            "signature" => Some(SectionId::Signature),
            "footer" => Some(SectionId::Footer),
            _ => None,
        }
    }

    pub fn category(&self) -> SectionCategory {
        match self {
            SectionId::Hero | SectionId::SimpleBody => SectionCategory::General,
            SectionId::SixSummaryCards => SectionCategory::Educational,
            SectionId::SellingPoints => SectionCategory::Product,
            SectionId::TestimonialQuote => SectionCategory::SocialProof,
            SectionId::BookACall => SectionCategory::GeneralCta,
            SectionId::Contact | SectionId::Signature | SectionId::Footer => {
                SectionCategory::General
            }
        }
    }

    /// One-line usage guidance handed to the planner.
    pub fn summary(&self) -> &'static str {
        match self {
            SectionId::Hero => "Opening headline, one-line subtitle, and a single CTA button.",
            SectionId::SimpleBody => {
                "Free-form body copy; two to four short HTML paragraphs or lists."
            }
            SectionId::SixSummaryCards => {
                "Grid of exactly six takeaway cards; use after the body for skimmable recaps."
            }
            SectionId::SellingPoints => {
                "Static pitch listing what the Lumail builder includes; product emails only."
            }
            SectionId::TestimonialQuote => "Static customer quote for social proof.",
            SectionId::BookACall => "Static banner inviting the reader to book a consultation.",
            SectionId::Contact => "Static contact details block.",
            SectionId::Signature => "Static sender sign-off; always placed before the footer.",
            SectionId::Footer => "Static legal footer with the unsubscribe link; always last.",
        }
    }

    /// Whether the section takes generated copy. Static sections render their
    /// template verbatim.
    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            SectionId::Hero | SectionId::SimpleBody | SectionId::SixSummaryCards
        )
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
