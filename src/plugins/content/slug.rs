use regex::Regex;
use std::sync::LazyLock;

static URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://)?(www\.)?").expect("url prefix pattern"));
static DOMAIN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[a-z]{2,}$").expect("domain suffix pattern"));
static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_-]+").expect("non-slug pattern"));
static HYPHEN_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("hyphen run pattern"));

/// Derive the public URL slug for a post from its title.
///
/// Titles are treated defensively as possible URLs: a protocol/`www.` prefix
/// and a trailing domain-extension-like suffix are stripped first. The suffix
/// trim also fires on ordinary titles ending in `.word`; that behavior is
/// load-bearing for existing links and must not change.
///
/// No uniqueness is enforced anywhere: two posts with the same title share a
/// slug, and slug lookup returns whichever the store yields first.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = URL_PREFIX.replace(&lowered, "");
    let stripped = DOMAIN_SUFFIX.replace(&stripped, "");
    // every run of characters outside [a-zA-Z0-9_-] becomes one hyphen
    let hyphenated = NON_SLUG.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::generate_slug;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(generate_slug("Hello World"), "hello-world");
    }

    #[test]
    fn deterministic() {
        let title = "Quarterly Outlook: What Changed?";
        assert_eq!(generate_slug(title), generate_slug(title));
    }

    #[test]
    fn strips_punctuation_and_currency_symbols() {
        assert_eq!(
            generate_slug("Tech Investment Reaches £20 billion"),
            "tech-investment-reaches-20-billion"
        );
    }

    #[test]
    fn empty_title_yields_empty_slug() {
        assert_eq!(generate_slug(""), "");
    }

    #[test]
    fn no_leading_trailing_or_doubled_hyphens() {
        let slug = generate_slug("  ...Growth -- & Strategy!  ");
        assert_eq!(slug, "growth-strategy");
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        assert!(!slug.contains("--"));
    }

    #[test]
    fn url_titles_lose_protocol_www_and_domain_extension() {
        assert_eq!(generate_slug("https://www.example.com"), "example");
        assert_eq!(generate_slug("www.example.co.uk"), "example-co");
    }

    #[test]
    fn domain_trim_also_fires_on_ordinary_dotted_titles() {
        // known quirk of treating titles as possible URLs
        assert_eq!(generate_slug("Annual report.final"), "annual-report");
    }

    #[test]
    fn underscores_and_digits_survive() {
        assert_eq!(generate_slug("release_notes 2025"), "release_notes-2025");
    }
}
