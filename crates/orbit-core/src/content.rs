//! Content items and the feed they arrive through.
//!
//! Feed documents are deserialized into loose `Raw*` records first and then
//! validated into [`ContentItem`], so negative counters or out-of-range
//! credibility never reach the scorer or allocator.

use crate::constants::{MARKER_PX_INVESTIGATION, MARKER_PX_OPINION, MARKER_PX_REPORT};
use serde::{Deserialize, Serialize};

static SAMPLE_FEED_JSON: &str = include_str!("../data/sample_feed.json");

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("item {id}: {field} must be non-negative, got {value}")]
    NegativeCounter {
        id: String,
        field: &'static str,
        value: i64,
    },
    #[error("item {id}: credibility {value} outside 0..=100")]
    CredibilityOutOfRange { id: String, value: i64 },
    #[error("item {id} appears more than once")]
    DuplicateId { id: String },
    #[error("feed unavailable: {0}")]
    Unavailable(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Investigation,
    Opinion,
    #[default]
    Report,
}

impl ContentKind {
    /// Rendered marker diameter for this kind.
    pub fn marker_px(self) -> f32 {
        match self {
            ContentKind::Investigation => MARKER_PX_INVESTIGATION,
            ContentKind::Opinion => MARKER_PX_OPINION,
            ContentKind::Report => MARKER_PX_REPORT,
        }
    }

    /// Border accent used by the surfaces.
    pub fn accent(self) -> &'static str {
        match self {
            ContentKind::Investigation => "var(--editorial-red)",
            ContentKind::Opinion => "var(--highlight-yellow)",
            ContentKind::Report => "var(--ink-gray)",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Engagement {
    pub views: u64,
    pub comments: u64,
    pub credibility_percent: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContentItem {
    pub id: String,
    pub headline: String,
    pub summary: String,
    pub kind: ContentKind,
    pub author: String,
    pub published_at: String,
    pub tags: Vec<String>,
    pub engagement: Engagement,
}

impl ContentItem {
    /// Convenience constructor for items built in code rather than parsed.
    pub fn new(id: impl Into<String>, kind: ContentKind, engagement: Engagement) -> Self {
        let id = id.into();
        Self {
            headline: id.clone(),
            id,
            summary: String::new(),
            kind,
            author: String::new(),
            published_at: String::new(),
            tags: Vec::new(),
            engagement,
        }
    }
}

// ---------------- Wire records ----------------

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct RawEngagement {
    views: i64,
    comments: i64,
    credibility: i64,
}

#[derive(Clone, Debug, Deserialize)]
struct RawItem {
    id: String,
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default, rename = "type")]
    kind: Option<ContentKind>,
    #[serde(default)]
    author: String,
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    engagement: RawEngagement,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    articles: Vec<RawItem>,
    opinions: Vec<RawItem>,
}

fn non_negative(id: &str, field: &'static str, value: i64) -> Result<u64, FeedError> {
    u64::try_from(value).map_err(|_| FeedError::NegativeCounter {
        id: id.to_string(),
        field,
        value,
    })
}

impl TryFrom<RawItem> for ContentItem {
    type Error = FeedError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let views = non_negative(&raw.id, "views", raw.engagement.views)?;
        let comments = non_negative(&raw.id, "comments", raw.engagement.comments)?;
        let credibility = raw.engagement.credibility;
        if !(0..=100).contains(&credibility) {
            return Err(FeedError::CredibilityOutOfRange {
                id: raw.id,
                value: credibility,
            });
        }
        Ok(ContentItem {
            id: raw.id,
            headline: raw.title,
            summary: raw.summary,
            kind: raw.kind.unwrap_or_default(),
            author: raw.author,
            published_at: raw.timestamp,
            tags: raw.tags,
            engagement: Engagement {
                views,
                comments,
                credibility_percent: credibility as u8,
            },
        })
    }
}

/// Orbs and the spotlight registry are keyed by item id, so ids must not repeat.
pub fn ensure_unique_ids<'a>(
    items: impl IntoIterator<Item = &'a ContentItem>,
) -> Result<(), FeedError> {
    let mut seen = fnv::FnvHashSet::default();
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(FeedError::DuplicateId {
                id: item.id.clone(),
            });
        }
    }
    Ok(())
}

fn validate_all(raw: Vec<RawItem>) -> Result<Vec<ContentItem>, FeedError> {
    raw.into_iter().map(ContentItem::try_from).collect()
}

// ---------------- Catalog ----------------

/// Articles and opinions from one feed document, validated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArticleCatalog {
    articles: Vec<ContentItem>,
    opinions: Vec<ContentItem>,
}

impl ArticleCatalog {
    pub fn from_json(text: &str) -> Result<Self, FeedError> {
        let doc: RawDocument = serde_json::from_str(text)?;
        let catalog = Self {
            articles: validate_all(doc.articles)?,
            opinions: validate_all(doc.opinions)?,
        };
        ensure_unique_ids(catalog.articles.iter().chain(&catalog.opinions))?;
        log::debug!(
            "[feed] catalog loaded: {} articles, {} opinions",
            catalog.articles.len(),
            catalog.opinions.len()
        );
        Ok(catalog)
    }

    /// The bundled sample document.
    pub fn sample() -> Result<Self, FeedError> {
        Self::from_json(SAMPLE_FEED_JSON)
    }

    pub fn articles(&self) -> &[ContentItem] {
        &self.articles
    }

    pub fn opinions(&self) -> &[ContentItem] {
        &self.opinions
    }

    /// Look an item up by id, articles first.
    pub fn find(&self, id: &str) -> Option<&ContentItem> {
        self.articles
            .iter()
            .chain(&self.opinions)
            .find(|item| item.id == id)
    }
}

// ---------------- Feeds ----------------

/// Source of content items for the orbit.
///
/// Retry and caching policy belong to the implementor; the orbit only asks
/// for the current list.
pub trait ContentFeed {
    fn list_items(&self) -> Result<Vec<ContentItem>, FeedError>;
}

/// Feed backed by a catalog; the orbit shows the catalog's articles.
#[derive(Clone, Debug, Default)]
pub struct JsonFeed {
    catalog: ArticleCatalog,
}

impl JsonFeed {
    pub fn from_json(text: &str) -> Result<Self, FeedError> {
        Ok(Self {
            catalog: ArticleCatalog::from_json(text)?,
        })
    }

    pub fn sample() -> Result<Self, FeedError> {
        Self::from_json(SAMPLE_FEED_JSON)
    }

    pub fn catalog(&self) -> &ArticleCatalog {
        &self.catalog
    }
}

impl ContentFeed for JsonFeed {
    fn list_items(&self) -> Result<Vec<ContentItem>, FeedError> {
        Ok(self.catalog.articles.clone())
    }
}

impl ContentFeed for Vec<ContentItem> {
    fn list_items(&self) -> Result<Vec<ContentItem>, FeedError> {
        ensure_unique_ids(self)?;
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_feed_parses() {
        let catalog = ArticleCatalog::sample().expect("sample feed is valid");
        assert!(!catalog.articles().is_empty());
        assert!(!catalog.opinions().is_empty());
        for item in catalog.articles() {
            assert!(item.engagement.credibility_percent <= 100);
        }
    }

    #[test]
    fn negative_views_rejected() {
        let doc = r#"{ "articles": [
            { "id": "a1", "title": "T", "engagement": { "views": -5, "comments": 0, "credibility": 10 } }
        ] }"#;
        match ArticleCatalog::from_json(doc) {
            Err(FeedError::NegativeCounter { id, field, value }) => {
                assert_eq!(id, "a1");
                assert_eq!(field, "views");
                assert_eq!(value, -5);
            }
            other => panic!("expected NegativeCounter, got {other:?}"),
        }
    }

    #[test]
    fn credibility_out_of_range_rejected() {
        let doc = r#"{ "articles": [
            { "id": "a1", "title": "T", "engagement": { "views": 5, "comments": 0, "credibility": 101 } }
        ] }"#;
        assert!(matches!(
            ArticleCatalog::from_json(doc),
            Err(FeedError::CredibilityOutOfRange { value: 101, .. })
        ));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let doc = r#"{
            "articles": [ { "id": "x", "title": "A" } ],
            "opinions": [ { "id": "x", "title": "B", "type": "opinion" } ]
        }"#;
        assert!(matches!(
            ArticleCatalog::from_json(doc),
            Err(FeedError::DuplicateId { .. })
        ));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let doc = r#"{ "articles": [ { "id": "a", "title": "Only a title" } ] }"#;
        let catalog = ArticleCatalog::from_json(doc).expect("valid");
        let item = &catalog.articles()[0];
        assert_eq!(item.kind, ContentKind::Report);
        assert_eq!(item.engagement, Engagement::default());
        assert!(catalog.opinions().is_empty());
    }

    #[test]
    fn find_searches_articles_then_opinions() {
        let doc = r#"{
            "articles": [ { "id": "a", "title": "Article" } ],
            "opinions": [ { "id": "o", "title": "Opinion", "type": "opinion" } ]
        }"#;
        let catalog = ArticleCatalog::from_json(doc).expect("valid");
        assert_eq!(catalog.find("a").map(|i| i.headline.as_str()), Some("Article"));
        assert_eq!(catalog.find("o").map(|i| i.kind), Some(ContentKind::Opinion));
        assert!(catalog.find("missing").is_none());
    }

    #[test]
    fn json_feed_lists_articles_only() {
        let feed = JsonFeed::sample().expect("sample");
        let items = feed.list_items().expect("items");
        assert_eq!(items.len(), feed.catalog().articles().len());
    }

    #[test]
    fn in_memory_feed_rejects_repeated_ids() {
        let item = |id: &str| ContentItem::new(id, ContentKind::Report, Engagement::default());
        let feed = vec![item("s0"), item("s1"), item("s0")];
        match feed.list_items() {
            Err(FeedError::DuplicateId { id }) => assert_eq!(id, "s0"),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
        let feed = vec![item("s0"), item("s1")];
        assert_eq!(feed.list_items().expect("unique").len(), 2);
    }

    #[test]
    fn unavailable_names_the_cause() {
        let err = FeedError::Unavailable("GET /api/articles returned 503".into());
        assert_eq!(
            err.to_string(),
            "feed unavailable: GET /api/articles returned 503"
        );
    }

    #[test]
    fn kind_tiers_are_ordered() {
        assert!(ContentKind::Investigation.marker_px() > ContentKind::Opinion.marker_px());
        assert!(ContentKind::Opinion.marker_px() > ContentKind::Report.marker_px());
    }
}
