//! Query action names.

use std::fmt;

/// Every action the Query Gateway understands, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// All series, most recently updated first.
    GetAllSeries,
    /// One series by id.
    GetSeries,
    /// All series with their chapter count.
    GetSeriesWithChapterCount,
    /// Chapters of a series, highest number first.
    GetChapters,
    /// One chapter and its pages.
    GetChapter,
    /// All genres by name.
    GetGenres,
    /// Genres of one series.
    GetSeriesGenres,
    /// Every series/genre link.
    GetAllSeriesGenres,
    /// Most viewed series for a period.
    GetPopularSeries,
    /// Most viewed series for a period, with genres.
    GetPopularSeriesWithGenres,
    /// Total views of a series.
    GetSeriesViews,
    /// Series with the most recent chapters.
    GetSeriesWithLatestChapters,
    /// Featured series with chapter counts and genres.
    GetFeaturedSeries,
    /// One page of the browse listing.
    GetBrowseSeries,
    /// Text and filter search.
    SearchSeries,
    /// Count a chapter view.
    RecordChapterView,
    /// Insert a series.
    CreateSeries,
    /// Patch a series.
    UpdateSeries,
    /// Delete a series.
    DeleteSeries,
    /// Insert a chapter and its pages.
    CreateChapter,
    /// Patch a chapter.
    UpdateChapter,
    /// Delete a chapter.
    DeleteChapter,
    /// Insert a genre.
    CreateGenre,
    /// Rename a genre.
    UpdateGenre,
    /// Delete a genre.
    DeleteGenre,
    /// Replace the genres of a series.
    UpdateSeriesGenres,
}

impl ActionKind {
    /// All actions, reads first.
    pub const ALL: [Self; 26] = [
        Self::GetAllSeries,
        Self::GetSeries,
        Self::GetSeriesWithChapterCount,
        Self::GetChapters,
        Self::GetChapter,
        Self::GetGenres,
        Self::GetSeriesGenres,
        Self::GetAllSeriesGenres,
        Self::GetPopularSeries,
        Self::GetPopularSeriesWithGenres,
        Self::GetSeriesViews,
        Self::GetSeriesWithLatestChapters,
        Self::GetFeaturedSeries,
        Self::GetBrowseSeries,
        Self::SearchSeries,
        Self::RecordChapterView,
        Self::CreateSeries,
        Self::UpdateSeries,
        Self::DeleteSeries,
        Self::CreateChapter,
        Self::UpdateChapter,
        Self::DeleteChapter,
        Self::CreateGenre,
        Self::UpdateGenre,
        Self::DeleteGenre,
        Self::UpdateSeriesGenres,
    ];

    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GetAllSeries => "get_all_series",
            Self::GetSeries => "get_series",
            Self::GetSeriesWithChapterCount => "get_series_with_chapter_count",
            Self::GetChapters => "get_chapters",
            Self::GetChapter => "get_chapter",
            Self::GetGenres => "get_genres",
            Self::GetSeriesGenres => "get_series_genres",
            Self::GetAllSeriesGenres => "get_all_series_genres",
            Self::GetPopularSeries => "get_popular_series",
            Self::GetPopularSeriesWithGenres => "get_popular_series_with_genres",
            Self::GetSeriesViews => "get_series_views",
            Self::GetSeriesWithLatestChapters => "get_series_with_latest_chapters",
            Self::GetFeaturedSeries => "get_featured_series",
            Self::GetBrowseSeries => "get_browse_series",
            Self::SearchSeries => "search_series",
            Self::RecordChapterView => "record_chapter_view",
            Self::CreateSeries => "create_series",
            Self::UpdateSeries => "update_series",
            Self::DeleteSeries => "delete_series",
            Self::CreateChapter => "create_chapter",
            Self::UpdateChapter => "update_chapter",
            Self::DeleteChapter => "delete_chapter",
            Self::CreateGenre => "create_genre",
            Self::UpdateGenre => "update_genre",
            Self::DeleteGenre => "delete_genre",
            Self::UpdateSeriesGenres => "update_series_genres",
        }
    }

    /// Looks up an action by its wire name. Matching is exact.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Whether the action mutates the catalog and needs an admin.
    ///
    /// Recording a chapter view is public.
    #[must_use]
    pub const fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::CreateSeries
                | Self::UpdateSeries
                | Self::DeleteSeries
                | Self::CreateChapter
                | Self::UpdateChapter
                | Self::DeleteChapter
                | Self::CreateGenre
                | Self::UpdateGenre
                | Self::DeleteGenre
                | Self::UpdateSeriesGenres
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_round_trip() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = ActionKind::ALL.iter().map(ActionKind::as_str).collect();
        assert_eq!(names.len(), ActionKind::ALL.len());
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(ActionKind::from_name("drop_everything"), None);
        assert_eq!(ActionKind::from_name("GET_GENRES"), None);
        assert_eq!(ActionKind::from_name(""), None);
    }

    #[test]
    fn test_admin_split() {
        let writes: Vec<_> = ActionKind::ALL
            .into_iter()
            .filter(ActionKind::requires_admin)
            .collect();
        assert_eq!(writes.len(), 10);
        assert!(!ActionKind::RecordChapterView.requires_admin());
        assert!(!ActionKind::SearchSeries.requires_admin());
        assert!(ActionKind::UpdateSeriesGenres.requires_admin());
    }
}
