use std::collections::HashMap;

use crate::domain::analysis::Citation;
use crate::domain::report::{SourceBreakdown, SourceCategory};

// First match wins; hostname is lowercased before matching.
const CATEGORY_MARKERS: &[(&str, SourceCategory)] = &[
    ("youtube", SourceCategory::Entertainment),
    ("netflix", SourceCategory::Entertainment),
    ("spotify", SourceCategory::Entertainment),
    ("twitch", SourceCategory::Entertainment),
    ("imdb", SourceCategory::Entertainment),
    ("facebook", SourceCategory::SocialMedia),
    ("instagram", SourceCategory::SocialMedia),
    ("twitter", SourceCategory::SocialMedia),
    ("tiktok", SourceCategory::SocialMedia),
    ("linkedin", SourceCategory::SocialMedia),
    ("pinterest", SourceCategory::SocialMedia),
    ("reddit", SourceCategory::Forum),
    ("quora", SourceCategory::Forum),
    ("stackexchange", SourceCategory::Forum),
    ("stackoverflow", SourceCategory::Forum),
    ("forum", SourceCategory::Forum),
    ("wikipedia", SourceCategory::Reference),
    ("britannica", SourceCategory::Reference),
    ("wiki", SourceCategory::Reference),
    ("amazon", SourceCategory::Ecommerce),
    ("ebay", SourceCategory::Ecommerce),
    ("etsy", SourceCategory::Ecommerce),
    ("walmart", SourceCategory::Ecommerce),
    ("shop", SourceCategory::Ecommerce),
    ("cnn", SourceCategory::News),
    ("bbc", SourceCategory::News),
    ("reuters", SourceCategory::News),
    ("nytimes", SourceCategory::News),
    ("guardian", SourceCategory::News),
    ("news", SourceCategory::News),
    ("medium", SourceCategory::Blog),
    ("substack", SourceCategory::Blog),
    ("wordpress", SourceCategory::Blog),
    ("blog", SourceCategory::Blog),
    ("coursera", SourceCategory::Education),
    ("udemy", SourceCategory::Education),
    ("khanacademy", SourceCategory::Education),
    (".edu", SourceCategory::Education),
    ("yelp", SourceCategory::Review),
    ("trustpilot", SourceCategory::Review),
    ("capterra", SourceCategory::Review),
    ("tripadvisor", SourceCategory::Review),
    (".gov", SourceCategory::Government),
];

/// Buckets a hostname into one of the fixed source categories by substring
/// match. Pure function of the hostname.
pub fn categorize_host(host: &str) -> SourceCategory {
    let host = host.to_lowercase();
    for (marker, category) in CATEGORY_MARKERS {
        if host.contains(marker) {
            return *category;
        }
    }
    SourceCategory::Other
}

/// Extracts the hostname from a citation URL and categorizes it. URLs that
/// fail to parse or carry no host fall into `Other`.
pub fn categorize_url(url: &str) -> SourceCategory {
    match reqwest::Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => categorize_host(host),
            None => SourceCategory::Other,
        },
        Err(_) => SourceCategory::Other,
    }
}

/// Counts citations per category, most-cited first.
pub fn source_breakdown(citations: &[Citation]) -> Vec<SourceBreakdown> {
    let mut counts: HashMap<SourceCategory, usize> = HashMap::new();
    for citation in citations {
        *counts.entry(categorize_url(&citation.url)).or_insert(0) += 1;
    }

    let mut breakdown: Vec<SourceBreakdown> = counts
        .into_iter()
        .map(|(category, count)| SourceBreakdown { category, count })
        .collect();
    breakdown.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.label().cmp(b.category.label())));
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(id: &str, url: &str) -> Citation {
        Citation {
            id: id.to_string(),
            response_id: "r1".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_known_hosts() {
        assert_eq!(
            categorize_host("www.youtube.com"),
            SourceCategory::Entertainment
        );
        assert_eq!(categorize_host("old.reddit.com"), SourceCategory::Forum);
        assert_eq!(
            categorize_host("en.wikipedia.org"),
            SourceCategory::Reference
        );
        assert_eq!(categorize_host("smile.amazon.com"), SourceCategory::Ecommerce);
        assert_eq!(categorize_host("edition.cnn.com"), SourceCategory::News);
        assert_eq!(categorize_host("usda.gov"), SourceCategory::Government);
    }

    #[test]
    fn test_categorization_is_idempotent() {
        let host = "blog.example.com";
        assert_eq!(categorize_host(host), categorize_host(host));
        assert_eq!(categorize_host(host), SourceCategory::Blog);
    }

    #[test]
    fn test_unrecognized_host_is_other() {
        assert_eq!(categorize_host("example.io"), SourceCategory::Other);
        assert_eq!(SourceCategory::Other.label(), "Unknown/Other");
    }

    #[test]
    fn test_unparseable_url_is_other() {
        assert_eq!(categorize_url("not a url"), SourceCategory::Other);
        assert_eq!(categorize_url("mailto:hi@example.com"), SourceCategory::Other);
    }

    #[test]
    fn test_breakdown_sorted_by_count() {
        let citations = vec![
            citation("c1", "https://www.youtube.com/watch?v=1"),
            citation("c2", "https://www.youtube.com/watch?v=2"),
            citation("c3", "https://old.reddit.com/r/acme"),
            citation("c4", "https://example.io/page"),
        ];
        let breakdown = source_breakdown(&citations);
        assert_eq!(breakdown[0].category, SourceCategory::Entertainment);
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown.len(), 3);
    }
}
