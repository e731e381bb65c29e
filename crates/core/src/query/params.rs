//! Typed parameters of query actions.
//!
//! Unknown fields are ignored. Blank strings in optional filters count as
//! absent, the way the reading site sends them.

use serde::Deserialize;
use uuid::Uuid;

/// Default number of popular series.
pub const DEFAULT_POPULAR_LIMIT: u32 = 10;
/// Default number of series in the latest-chapters listing.
pub const DEFAULT_LATEST_LIMIT: u32 = 12;
/// Chapters attached to each series in the latest-chapters listing.
pub const LATEST_CHAPTERS_PER_SERIES: u32 = 3;
/// Fixed page size of the browse listing.
pub const BROWSE_PAGE_SIZE: u32 = 18;
/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
/// Views a single viewer may record per minute.
pub const VIEWS_PER_MINUTE: i64 = 10;

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// `{id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdParams {
    /// Row id.
    pub id: Uuid,
}

/// `{series_id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeriesRef {
    /// Series id.
    pub series_id: Uuid,
}

/// Window for popularity ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopularPeriod {
    /// Lifetime `total_views`.
    #[default]
    All,
    /// Views in the last 7 days.
    Weekly,
    /// Views in the last 30 days.
    Monthly,
}

impl PopularPeriod {
    /// Length of the window in days, `None` for lifetime.
    #[must_use]
    pub const fn window_days(&self) -> Option<i32> {
        match self {
            Self::All => None,
            Self::Weekly => Some(7),
            Self::Monthly => Some(30),
        }
    }
}

/// Parameters of the popular-series actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PopularParams {
    /// Ranking window.
    #[serde(default)]
    pub time_period: PopularPeriod,
    /// Maximum rows.
    pub result_limit: Option<u32>,
}

impl PopularParams {
    /// Effective limit. Zero falls back to the default.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.result_limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_POPULAR_LIMIT)
    }
}

/// Parameters of `get_series_with_latest_chapters`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LatestParams {
    /// Maximum series.
    pub limit: Option<u32>,
}

impl LatestParams {
    /// Effective limit. Zero falls back to the default.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LATEST_LIMIT)
    }
}

/// Parameters of `get_browse_series`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BrowseParams {
    /// Zero-based page.
    pub page: Option<u32>,
}

impl BrowseParams {
    /// Requested page, zero when absent.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    /// Row offset of the page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page()) * u64::from(BROWSE_PAGE_SIZE)
    }

    /// Next page number, only when this page came back full.
    #[must_use]
    pub fn next_page(&self, returned: usize) -> Option<u32> {
        (returned == BROWSE_PAGE_SIZE as usize).then(|| self.page() + 1)
    }
}

/// Result ordering for `search_series`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    /// Relevance score, then most recently updated.
    #[default]
    Relevance,
    /// Most recently updated only.
    Latest,
}

/// Parameters of `search_series`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchParams {
    /// Free text matched against title, alternative titles, and description.
    pub search_query: Option<String>,
    /// Exact series status.
    pub filter_status: Option<String>,
    /// Exact series type.
    pub filter_type: Option<String>,
    /// Keep series carrying at least one of these genres.
    pub filter_genres: Option<Vec<Uuid>>,
    /// Ordering.
    #[serde(default)]
    pub sort_by: SearchSort,
    /// Maximum rows before genre filtering.
    pub result_limit: Option<u32>,
    /// Rows skipped before genre filtering.
    pub result_offset: Option<u32>,
}

impl SearchParams {
    /// Trimmed search text, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        non_blank(self.search_query.as_ref())
    }

    /// Status filter, if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        non_blank(self.filter_status.as_ref())
    }

    /// Type filter, if any.
    #[must_use]
    pub fn series_type(&self) -> Option<&str> {
        non_blank(self.filter_type.as_ref())
    }

    /// Genre filter, if non-empty.
    #[must_use]
    pub fn genres(&self) -> Option<&[Uuid]> {
        self.filter_genres.as_deref().filter(|g| !g.is_empty())
    }

    /// Whether any criterion was given. Without one the search returns nothing.
    #[must_use]
    pub fn has_criteria(&self) -> bool {
        self.query().is_some()
            || self.status().is_some()
            || self.series_type().is_some()
            || self.genres().is_some()
    }

    /// Effective limit. Zero falls back to the default.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.result_limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
    }

    /// Effective offset.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.result_offset.unwrap_or(0)
    }
}

/// Parameters of `record_chapter_view`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChapterViewParams {
    /// Viewed chapter.
    pub chapter_id: Uuid,
    /// Series of the chapter.
    pub series_id: Uuid,
    /// Anonymous viewer fingerprint. Enables rate limiting and deduplication.
    pub viewer_hash: Option<String>,
}

impl ChapterViewParams {
    /// Fingerprint, if a non-blank one was sent.
    #[must_use]
    pub fn viewer_hash(&self) -> Option<&str> {
        non_blank(self.viewer_hash.as_ref())
    }
}

/// Parameters of `create_series`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewSeries {
    /// Display title.
    pub title: String,
    /// Other known titles.
    #[serde(default)]
    pub alternative_titles: Vec<String>,
    /// Synopsis.
    pub description: Option<String>,
    /// Cover image URL.
    pub cover_url: Option<String>,
    /// Banner image URL.
    pub banner_url: Option<String>,
    /// Publication status, `ongoing` when absent.
    pub status: Option<String>,
    /// Format, `manhwa` when absent.
    #[serde(rename = "type")]
    pub series_type: Option<String>,
    /// Rating.
    pub rating: Option<f64>,
    /// Shown in the featured carousel.
    #[serde(default)]
    pub is_featured: bool,
}

impl NewSeries {
    /// Status to store.
    #[must_use]
    pub fn status(&self) -> &str {
        non_blank(self.status.as_ref()).unwrap_or("ongoing")
    }

    /// Type to store.
    #[must_use]
    pub fn series_type(&self) -> &str {
        non_blank(self.series_type.as_ref()).unwrap_or("manhwa")
    }
}

/// Parameters of `update_series`. Absent fields keep their value, except
/// `rating`, which is always overwritten.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesUpdate {
    /// Series id.
    pub id: Uuid,
    /// New title.
    pub title: Option<String>,
    /// New alternative titles.
    pub alternative_titles: Option<Vec<String>>,
    /// New synopsis.
    pub description: Option<String>,
    /// New cover image URL.
    pub cover_url: Option<String>,
    /// New banner image URL.
    pub banner_url: Option<String>,
    /// New status.
    pub status: Option<String>,
    /// New format.
    #[serde(rename = "type")]
    pub series_type: Option<String>,
    /// Rating. `None` clears it.
    pub rating: Option<f64>,
    /// New featured flag.
    pub is_featured: Option<bool>,
}

/// One page of a new chapter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPage {
    /// One-based position.
    pub page_number: i32,
    /// Image URL on the CDN.
    pub image_url: String,
}

/// Parameters of `create_chapter`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewChapter {
    /// Owning series.
    pub series_id: Uuid,
    /// Chapter number; fractional numbers are allowed.
    pub chapter_number: f64,
    /// Chapter title.
    pub title: Option<String>,
    /// `images` (default) or `pdf`.
    pub chapter_type: Option<String>,
    /// PDF URL for PDF chapters.
    pub pdf_url: Option<String>,
    /// Pages inserted with the chapter.
    #[serde(default)]
    pub pages: Vec<NewPage>,
}

impl NewChapter {
    /// Chapter type to store.
    #[must_use]
    pub fn chapter_type(&self) -> &str {
        non_blank(self.chapter_type.as_ref()).unwrap_or("images")
    }
}

/// Parameters of `update_chapter`. `title` is always overwritten.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChapterUpdate {
    /// Chapter id.
    pub id: Uuid,
    /// New number; absent keeps the current one.
    pub chapter_number: Option<f64>,
    /// New title; absent clears it.
    pub title: Option<String>,
}

/// Parameters of `create_genre`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewGenre {
    /// Display name.
    pub name: String,
    /// Unique URL slug.
    pub slug: String,
}

/// Parameters of `update_genre`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenreUpdate {
    /// Genre id.
    pub id: Uuid,
    /// New name.
    pub name: String,
    /// New slug.
    pub slug: String,
}

/// Parameters of `update_series_genres`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeriesGenresUpdate {
    /// Series id.
    pub series_id: Uuid,
    /// Complete genre set; empty clears it.
    #[serde(default)]
    pub genre_ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({}), PopularPeriod::All, 10)]
    #[case(json!({"time_period": "weekly"}), PopularPeriod::Weekly, 10)]
    #[case(json!({"time_period": "monthly", "result_limit": 5}), PopularPeriod::Monthly, 5)]
    #[case(json!({"result_limit": 0}), PopularPeriod::All, 10)]
    fn test_popular_defaults(
        #[case] raw: serde_json::Value,
        #[case] period: PopularPeriod,
        #[case] limit: u32,
    ) {
        let params: PopularParams = serde_json::from_value(raw).unwrap();
        assert_eq!(params.time_period, period);
        assert_eq!(params.limit(), limit);
    }

    #[test]
    fn test_popular_window() {
        assert_eq!(PopularPeriod::All.window_days(), None);
        assert_eq!(PopularPeriod::Weekly.window_days(), Some(7));
        assert_eq!(PopularPeriod::Monthly.window_days(), Some(30));
    }

    #[test]
    fn test_unknown_period_rejected() {
        let result: Result<PopularParams, _> =
            serde_json::from_value(json!({"time_period": "daily"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_browse_paging() {
        let first = BrowseParams::default();
        assert_eq!(first.offset(), 0);
        assert_eq!(first.next_page(18), Some(1));
        assert_eq!(first.next_page(17), None);

        let third = BrowseParams { page: Some(2) };
        assert_eq!(third.offset(), 36);
        assert_eq!(third.next_page(18), Some(3));
        assert_eq!(third.next_page(0), None);
    }

    #[test]
    fn test_latest_limit() {
        assert_eq!(LatestParams::default().limit(), 12);
        assert_eq!(LatestParams { limit: Some(4) }.limit(), 4);
    }

    #[rstest]
    #[case(json!({}), false)]
    #[case(json!({"search_query": "   "}), false)]
    #[case(json!({"filter_status": ""}), false)]
    #[case(json!({"filter_genres": []}), false)]
    #[case(json!({"search_query": "solo"}), true)]
    #[case(json!({"filter_type": "manga"}), true)]
    #[case(json!({"filter_genres": ["7c9e6679-7425-40de-944b-e07fc1f90ae7"]}), true)]
    fn test_search_criteria(#[case] raw: serde_json::Value, #[case] expected: bool) {
        let params: SearchParams = serde_json::from_value(raw).unwrap();
        assert_eq!(params.has_criteria(), expected);
    }

    #[test]
    fn test_search_defaults() {
        let params: SearchParams =
            serde_json::from_value(json!({"search_query": "  Solo  "})).unwrap();
        assert_eq!(params.query(), Some("Solo"));
        assert_eq!(params.sort_by, SearchSort::Relevance);
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_new_series_defaults() {
        let series: NewSeries = serde_json::from_value(json!({"title": "Tower"})).unwrap();
        assert_eq!(series.status(), "ongoing");
        assert_eq!(series.series_type(), "manhwa");
        assert!(series.alternative_titles.is_empty());
        assert!(!series.is_featured);
    }

    #[test]
    fn test_new_series_type_field() {
        let series: NewSeries =
            serde_json::from_value(json!({"title": "Tower", "type": "manga"})).unwrap();
        assert_eq!(series.series_type(), "manga");
    }

    #[test]
    fn test_new_chapter_pages() {
        let chapter: NewChapter = serde_json::from_value(json!({
            "series_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "chapter_number": 12.5,
            "pages": [
                {"page_number": 1, "image_url": "https://cdn.example.com/p1.jpg"},
                {"page_number": 2, "image_url": "https://cdn.example.com/p2.jpg"}
            ]
        }))
        .unwrap();
        assert_eq!(chapter.chapter_type(), "images");
        assert_eq!(chapter.pages.len(), 2);
        assert!((chapter.chapter_number - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_viewer_hash_blank() {
        let view: ChapterViewParams = serde_json::from_value(json!({
            "chapter_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "series_id": "16fd2706-8baf-433b-82eb-8c7fada847da",
            "viewer_hash": ""
        }))
        .unwrap();
        assert_eq!(view.viewer_hash(), None);
    }
}
