//! Topical category resolution.
//!
//! Infers a single category label from a candidate's noisy textual signals
//! (title, description, tags, host name) via a priority cascade: explicit
//! caller category → keyword-rule scoring → first usable tag → host label →
//! the `"Other"` fallback. Resolution is deterministic: equal keyword scores
//! break toward the earlier rule, so the rule table order is part of the
//! contract.

use url::Url;

use crate::models::BookmarkCandidate;

/// Sentinel category assigned when no signal is usable.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Values too vague to keep as a category. A caller-supplied category, a
/// tag, or a host label matching this set is treated as absent.
const GENERIC_PLACEHOLDERS: &[&str] = &[
    "",
    "other",
    "others",
    "misc",
    "miscellaneous",
    "general",
    "uncategorized",
    "unknown",
];

/// Keyword rules, scored in order. Keywords are matched as substrings of a
/// space-padded lowercase corpus, so entries may carry their own padding
/// (`" ai "`) or stems (`"advertis"`).
const CATEGORY_RULES: &[(&str, &[&str])] = &[
    (
        "AI",
        &[
            " ai ",
            "artificial intelligence",
            "machine learning",
            "deep learning",
            "neural network",
            "chatgpt",
            "openai",
            " llm",
            " gpt",
            "hugging face",
        ],
    ),
    (
        "Development",
        &[
            "github",
            "gitlab",
            "programming",
            "developer",
            "coding",
            " code ",
            " api ",
            " sdk ",
            "stack overflow",
            "framework",
            "javascript",
            "typescript",
            "python",
            " rust ",
            "backend",
            "frontend",
            "devops",
            "open source",
        ],
    ),
    (
        "Design",
        &[
            "design",
            "figma",
            " ui ",
            " ux ",
            "typography",
            "illustration",
            "dribbble",
            "behance",
            "wireframe",
            "color palette",
        ],
    ),
    (
        "Marketing",
        &[
            "marketing",
            " seo ",
            "advertis",
            "campaign",
            "newsletter",
            "landing page",
            "conversion",
            "social media",
            "branding",
            "growth hack",
        ],
    ),
    (
        "Learning",
        &[
            "course",
            "tutorial",
            "learn",
            "education",
            "academy",
            "lesson",
            "training",
            "udemy",
            "coursera",
            "bootcamp",
            "how to",
        ],
    ),
    (
        "News",
        &[
            "news",
            "headline",
            "breaking",
            "current events",
            "politics",
            "journalism",
            "reuters",
            "magazine",
            " press ",
        ],
    ),
    (
        "Tools",
        &[
            "tool",
            "utility",
            "productivity",
            "extension",
            "plugin",
            "generator",
            "converter",
            "calculator",
            "automation",
            "workflow",
        ],
    ),
    (
        "Business",
        &[
            "business",
            "startup",
            "entrepreneur",
            " saas ",
            " b2b ",
            "strategy",
            "management",
            "leadership",
            "ecommerce",
            "sales",
        ],
    ),
    (
        "Finance",
        &[
            "finance",
            "investing",
            "investment",
            "stock",
            "crypto",
            "bitcoin",
            "budget",
            "banking",
            "trading",
            "economy",
        ],
    ),
    (
        "Entertainment",
        &[
            "movie",
            "music",
            "gaming",
            " game",
            "video",
            "streaming",
            "netflix",
            "youtube",
            "podcast",
            "entertainment",
        ],
    ),
];

/// Returns true for values in the generic/placeholder set.
pub fn is_generic_placeholder(value: &str) -> bool {
    let needle = value.trim().to_lowercase();
    GENERIC_PLACEHOLDERS.contains(&needle.as_str())
}

/// Resolve a candidate's category. Always returns a non-empty label; the
/// candidate itself is not mutated.
pub fn resolve(candidate: &BookmarkCandidate) -> String {
    // 1. Explicit category wins unless it is a placeholder.
    if !is_generic_placeholder(&candidate.category) {
        return title_case(&candidate.category);
    }

    // 2. Keyword scoring over the combined signal corpus.
    let host = host_label(&candidate.url);
    let corpus = build_corpus(candidate, &host);
    if let Some(label) = best_keyword_match(&corpus) {
        return label.to_string();
    }

    // 3. First tag that is not itself a placeholder.
    if let Some(tag) = candidate
        .tags
        .iter()
        .find(|t| !is_generic_placeholder(t))
    {
        return title_case(tag);
    }

    // 4. Host label as a last-resort signal.
    if !is_generic_placeholder(&host) {
        return title_case(&host);
    }

    // 5. Nothing usable.
    FALLBACK_CATEGORY.to_string()
}

/// Lowercase search corpus, padded with spaces so keywords carrying their
/// own word boundaries can match at either end.
fn build_corpus(candidate: &BookmarkCandidate, host: &str) -> String {
    let mut parts = vec![candidate.title.clone(), candidate.description.clone()];
    parts.extend(candidate.tags.iter().cloned());
    parts.push(host.to_string());
    format!(" {} ", parts.join(" ").to_lowercase())
}

/// Label of the strictly-highest-scoring rule, or `None` when every rule
/// scores zero. Ties keep the earlier rule.
fn best_keyword_match(corpus: &str) -> Option<&'static str> {
    let mut best: Option<&'static str> = None;
    let mut best_score = 0usize;
    for (label, keywords) in CATEGORY_RULES {
        let score = keywords.iter().filter(|kw| corpus.contains(*kw)).count();
        if score > best_score {
            best = Some(label);
            best_score = score;
        }
    }
    best
}

/// Short human-readable name from a URL's domain: `www.` stripped, then the
/// registrable label — three from the end when the second-to-last label is a
/// multi-part TLD component (`example.co.uk` → `example`), otherwise second
/// from the end. Returns an empty string on any parse failure.
pub fn host_label(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };
    let host = host.strip_prefix("www.").unwrap_or(host);
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    match labels.len() {
        0 => String::new(),
        1 => labels[0].to_string(),
        n if n >= 3
            && matches!(
                labels[n - 2],
                "co" | "com" | "org" | "net" | "gov" | "edu" | "ac"
            ) =>
        {
            labels[n - 3].to_string()
        }
        n => labels[n - 2].to_string(),
    }
}

/// `"hello-world_again"` → `"Hello World Again"`.
pub fn title_case(value: &str) -> String {
    value
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(category: &str, title: &str, description: &str, url: &str, tags: &[&str]) -> BookmarkCandidate {
        BookmarkCandidate {
            title: title.to_string(),
            url: url.to_string(),
            added_at: None,
            icon: None,
            description: description.to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_favorite: false,
        }
    }

    #[test]
    fn test_explicit_category_short_circuits() {
        let c = candidate("dev tools", "irrelevant", "", "https://example.com", &[]);
        assert_eq!(resolve(&c), "Dev Tools");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut c = candidate("", "Learn React with this free course", "", "", &[]);
        let first = resolve(&c);
        c.category = first.clone();
        assert_eq!(resolve(&c), first);
    }

    #[test]
    fn test_generic_explicit_category_is_overridden() {
        for generic in ["Other", "misc", "UNCATEGORIZED", "  general  "] {
            let c = candidate(generic, "Figma wireframe tips", "", "", &[]);
            assert_eq!(resolve(&c), "Design", "generic value {:?}", generic);
        }
    }

    #[test]
    fn test_keyword_match_learning() {
        let c = candidate("", "Learn React with this free course", "", "", &[]);
        assert_eq!(resolve(&c), "Learning");
    }

    #[test]
    fn test_keyword_tie_breaks_toward_earlier_rule() {
        // "machine learning" scores AI once and Learning once ("learn" is a
        // substring of "learning"); AI is defined first and must win.
        let c = candidate("", "machine learning", "", "", &[]);
        assert_eq!(resolve(&c), "AI");
    }

    #[test]
    fn test_keyword_score_counts_distinct_keywords() {
        // One Development hit ("github" via the host) against two Learning
        // hits — the higher count wins regardless of rule order.
        let c = candidate(
            "",
            "A tutorial to learn version control",
            "",
            "https://github.com/git/git",
            &[],
        );
        assert_eq!(resolve(&c), "Learning");
    }

    #[test]
    fn test_tag_fallback_skips_placeholders() {
        let c = candidate("", "", "", "", &["misc", "recipes"]);
        assert_eq!(resolve(&c), "Recipes");
    }

    #[test]
    fn test_host_label_fallback_multi_part_tld() {
        let c = candidate("", "", "", "https://blog.example.co.uk/post", &[]);
        assert_eq!(resolve(&c), "Example");
    }

    #[test]
    fn test_all_empty_resolves_to_other() {
        let c = candidate("", "", "", "", &[]);
        assert_eq!(resolve(&c), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_host_label_extraction() {
        assert_eq!(host_label("https://www.github.com/rust-lang"), "github");
        assert_eq!(host_label("https://news.ycombinator.com"), "ycombinator");
        assert_eq!(host_label("https://blog.example.co.uk/x"), "example");
        assert_eq!(host_label("http://localhost:8080/"), "localhost");
        assert_eq!(host_label("not a url"), "");
        assert_eq!(host_label(""), "");
    }

    #[test]
    fn test_generic_host_label_falls_through_to_other() {
        let c = candidate("", "", "", "https://misc.org/page", &[]);
        assert_eq!(resolve(&c), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello-world_again now"), "Hello World Again Now");
        assert_eq!(title_case("ALLCAPS"), "Allcaps");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_is_generic_placeholder() {
        assert!(is_generic_placeholder(""));
        assert!(is_generic_placeholder("  Misc "));
        assert!(is_generic_placeholder("OTHER"));
        assert!(!is_generic_placeholder("Recipes"));
    }
}
