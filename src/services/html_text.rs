//! Markup-to-text helpers shared by article extraction and the plain-text
//! rendering of assembled emails.

use std::sync::OnceLock;

use regex::Regex;

fn re(pattern: &'static str, cell: &'static OnceLock<Regex>) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static regex"))
}

static INVISIBLE: OnceLock<Regex> = OnceLock::new();
static IMAGES: OnceLock<Regex> = OnceLock::new();
static BREAKS: OnceLock<Regex> = OnceLock::new();
static BLOCK_ENDS: OnceLock<Regex> = OnceLock::new();
static LIST_ITEMS: OnceLock<Regex> = OnceLock::new();
static TAGS: OnceLock<Regex> = OnceLock::new();
static BLANK_RUNS: OnceLock<Regex> = OnceLock::new();

/// Remove every tag from a fragment, leaving inner text.
pub fn strip_tags(html: &str) -> String {
    re(r"<[^>]+>", &TAGS).replace_all(html, "").to_string()
}

/// Decode the handful of entities our templates and typical articles use.
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&ldquo;", "\u{201c}")
        .replace("&rdquo;", "\u{201d}")
        .replace("&middot;", "\u{b7}")
        .replace("&auml;", "\u{e4}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// One-way, lossy plain-text rendering: markup stripped, link targets and
/// images dropped, block boundaries turned into line breaks.
pub fn html_to_plain_text(html: &str) -> String {
    let text = re(r"(?is)<head.*?</head>|<style.*?</style>|<script.*?</script>|<!--.*?-->", &INVISIBLE)
        .replace_all(html, "");
    let text = re(r"(?i)<img[^>]*>", &IMAGES).replace_all(&text, "");
    let text = re(r"(?i)<br\s*/?>", &BREAKS).replace_all(&text, "\n");
    let text = re(r"(?i)<li[^>]*>", &LIST_ITEMS).replace_all(&text, "- ");
    let text =
        re(r"(?i)</(p|h[1-6]|tr|td|div|li|ul|ol|table)>", &BLOCK_ENDS).replace_all(&text, "\n");
    let text = strip_tags(&text);
    let text = decode_entities(&text);

    let trimmed_lines =
        text.lines().map(str::trim).collect::<Vec<_>>().join("\n");
    re(r"\n{3,}", &BLANK_RUNS).replace_all(&trimmed_lines, "\n\n").trim().to_string()
}
