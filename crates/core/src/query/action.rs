//! Parsed query actions.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::QueryError;
use super::kind::ActionKind;
use super::params::{
    BrowseParams, ChapterUpdate, ChapterViewParams, GenreUpdate, IdParams, LatestParams,
    NewChapter, NewGenre, NewSeries, PopularParams, SearchParams, SeriesGenresUpdate, SeriesRef,
    SeriesUpdate,
};

/// A query action with its typed parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAction {
    /// See [`ActionKind::GetAllSeries`].
    GetAllSeries,
    /// See [`ActionKind::GetSeries`].
    GetSeries(IdParams),
    /// See [`ActionKind::GetSeriesWithChapterCount`].
    GetSeriesWithChapterCount,
    /// See [`ActionKind::GetChapters`].
    GetChapters(SeriesRef),
    /// See [`ActionKind::GetChapter`].
    GetChapter(IdParams),
    /// See [`ActionKind::GetGenres`].
    GetGenres,
    /// See [`ActionKind::GetSeriesGenres`].
    GetSeriesGenres(SeriesRef),
    /// See [`ActionKind::GetAllSeriesGenres`].
    GetAllSeriesGenres,
    /// See [`ActionKind::GetPopularSeries`].
    GetPopularSeries(PopularParams),
    /// See [`ActionKind::GetPopularSeriesWithGenres`].
    GetPopularSeriesWithGenres(PopularParams),
    /// See [`ActionKind::GetSeriesViews`].
    GetSeriesViews(SeriesRef),
    /// See [`ActionKind::GetSeriesWithLatestChapters`].
    GetSeriesWithLatestChapters(LatestParams),
    /// See [`ActionKind::GetFeaturedSeries`].
    GetFeaturedSeries,
    /// See [`ActionKind::GetBrowseSeries`].
    GetBrowseSeries(BrowseParams),
    /// See [`ActionKind::SearchSeries`].
    SearchSeries(SearchParams),
    /// See [`ActionKind::RecordChapterView`].
    RecordChapterView(ChapterViewParams),
    /// See [`ActionKind::CreateSeries`].
    CreateSeries(NewSeries),
    /// See [`ActionKind::UpdateSeries`].
    UpdateSeries(SeriesUpdate),
    /// See [`ActionKind::DeleteSeries`].
    DeleteSeries(IdParams),
    /// See [`ActionKind::CreateChapter`].
    CreateChapter(NewChapter),
    /// See [`ActionKind::UpdateChapter`].
    UpdateChapter(ChapterUpdate),
    /// See [`ActionKind::DeleteChapter`].
    DeleteChapter(IdParams),
    /// See [`ActionKind::CreateGenre`].
    CreateGenre(NewGenre),
    /// See [`ActionKind::UpdateGenre`].
    UpdateGenre(GenreUpdate),
    /// See [`ActionKind::DeleteGenre`].
    DeleteGenre(IdParams),
    /// See [`ActionKind::UpdateSeriesGenres`].
    UpdateSeriesGenres(SeriesGenresUpdate),
}

impl QueryAction {
    /// Deserializes `params` for `kind`. `null` is read as `{}`.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidParams` if the params do not fit the action.
    pub fn parse(kind: ActionKind, params: Value) -> Result<Self, QueryError> {
        let params = if params.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            params
        };
        let p = Params { kind, raw: params };

        Ok(match kind {
            ActionKind::GetAllSeries => Self::GetAllSeries,
            ActionKind::GetSeries => Self::GetSeries(p.read()?),
            ActionKind::GetSeriesWithChapterCount => Self::GetSeriesWithChapterCount,
            ActionKind::GetChapters => Self::GetChapters(p.read()?),
            ActionKind::GetChapter => Self::GetChapter(p.read()?),
            ActionKind::GetGenres => Self::GetGenres,
            ActionKind::GetSeriesGenres => Self::GetSeriesGenres(p.read()?),
            ActionKind::GetAllSeriesGenres => Self::GetAllSeriesGenres,
            ActionKind::GetPopularSeries => Self::GetPopularSeries(p.read()?),
            ActionKind::GetPopularSeriesWithGenres => Self::GetPopularSeriesWithGenres(p.read()?),
            ActionKind::GetSeriesViews => Self::GetSeriesViews(p.read()?),
            ActionKind::GetSeriesWithLatestChapters => {
                Self::GetSeriesWithLatestChapters(p.read()?)
            }
            ActionKind::GetFeaturedSeries => Self::GetFeaturedSeries,
            ActionKind::GetBrowseSeries => Self::GetBrowseSeries(p.read()?),
            ActionKind::SearchSeries => Self::SearchSeries(p.read()?),
            ActionKind::RecordChapterView => Self::RecordChapterView(p.read()?),
            ActionKind::CreateSeries => Self::CreateSeries(p.read()?),
            ActionKind::UpdateSeries => Self::UpdateSeries(p.read()?),
            ActionKind::DeleteSeries => Self::DeleteSeries(p.read()?),
            ActionKind::CreateChapter => Self::CreateChapter(p.read()?),
            ActionKind::UpdateChapter => Self::UpdateChapter(p.read()?),
            ActionKind::DeleteChapter => Self::DeleteChapter(p.read()?),
            ActionKind::CreateGenre => Self::CreateGenre(p.read()?),
            ActionKind::UpdateGenre => Self::UpdateGenre(p.read()?),
            ActionKind::DeleteGenre => Self::DeleteGenre(p.read()?),
            ActionKind::UpdateSeriesGenres => Self::UpdateSeriesGenres(p.read()?),
        })
    }

    /// The action's name.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::GetAllSeries => ActionKind::GetAllSeries,
            Self::GetSeries(_) => ActionKind::GetSeries,
            Self::GetSeriesWithChapterCount => ActionKind::GetSeriesWithChapterCount,
            Self::GetChapters(_) => ActionKind::GetChapters,
            Self::GetChapter(_) => ActionKind::GetChapter,
            Self::GetGenres => ActionKind::GetGenres,
            Self::GetSeriesGenres(_) => ActionKind::GetSeriesGenres,
            Self::GetAllSeriesGenres => ActionKind::GetAllSeriesGenres,
            Self::GetPopularSeries(_) => ActionKind::GetPopularSeries,
            Self::GetPopularSeriesWithGenres(_) => ActionKind::GetPopularSeriesWithGenres,
            Self::GetSeriesViews(_) => ActionKind::GetSeriesViews,
            Self::GetSeriesWithLatestChapters(_) => ActionKind::GetSeriesWithLatestChapters,
            Self::GetFeaturedSeries => ActionKind::GetFeaturedSeries,
            Self::GetBrowseSeries(_) => ActionKind::GetBrowseSeries,
            Self::SearchSeries(_) => ActionKind::SearchSeries,
            Self::RecordChapterView(_) => ActionKind::RecordChapterView,
            Self::CreateSeries(_) => ActionKind::CreateSeries,
            Self::UpdateSeries(_) => ActionKind::UpdateSeries,
            Self::DeleteSeries(_) => ActionKind::DeleteSeries,
            Self::CreateChapter(_) => ActionKind::CreateChapter,
            Self::UpdateChapter(_) => ActionKind::UpdateChapter,
            Self::DeleteChapter(_) => ActionKind::DeleteChapter,
            Self::CreateGenre(_) => ActionKind::CreateGenre,
            Self::UpdateGenre(_) => ActionKind::UpdateGenre,
            Self::DeleteGenre(_) => ActionKind::DeleteGenre,
            Self::UpdateSeriesGenres(_) => ActionKind::UpdateSeriesGenres,
        }
    }
}

struct Params {
    kind: ActionKind,
    raw: Value,
}

impl Params {
    fn read<T: DeserializeOwned>(&self) -> Result<T, QueryError> {
        T::deserialize(&self.raw).map_err(|e| QueryError::InvalidParams {
            action: self.kind,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::params::PopularPeriod;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_null_params_for_unit_action() {
        let action = QueryAction::parse(ActionKind::GetGenres, Value::Null).unwrap();
        assert_eq!(action, QueryAction::GetGenres);
    }

    #[test]
    fn test_extra_params_ignored() {
        let action =
            QueryAction::parse(ActionKind::GetAllSeries, json!({"anything": 1})).unwrap();
        assert_eq!(action, QueryAction::GetAllSeries);
    }

    #[test]
    fn test_null_params_use_defaults() {
        let action = QueryAction::parse(ActionKind::GetPopularSeries, Value::Null).unwrap();
        let QueryAction::GetPopularSeries(params) = action else {
            panic!("wrong variant");
        };
        assert_eq!(params.time_period, PopularPeriod::All);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_typed_id() {
        let id = Uuid::new_v4();
        let action = QueryAction::parse(ActionKind::GetSeries, json!({"id": id})).unwrap();
        assert_eq!(action, QueryAction::GetSeries(IdParams { id }));
        assert_eq!(action.kind(), ActionKind::GetSeries);
    }

    #[test]
    fn test_missing_required_field() {
        let err = QueryAction::parse(ActionKind::DeleteSeries, json!({})).unwrap_err();
        match err {
            QueryError::InvalidParams { action, message } => {
                assert_eq!(action, ActionKind::DeleteSeries);
                assert!(message.contains("id"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_uuid() {
        let err =
            QueryAction::parse(ActionKind::GetChapters, json!({"series_id": "1 OR 1=1"}))
                .unwrap_err();
        assert!(matches!(err, QueryError::InvalidParams { .. }));
    }

    #[test]
    fn test_kind_matches_parse_input() {
        let id = Uuid::new_v4();
        let cases = [
            (ActionKind::GetAllSeries, json!({})),
            (ActionKind::GetChapter, json!({"id": id})),
            (ActionKind::GetBrowseSeries, json!({"page": 2})),
            (ActionKind::SearchSeries, json!({"search_query": "x"})),
            (
                ActionKind::RecordChapterView,
                json!({"chapter_id": id, "series_id": id}),
            ),
            (ActionKind::CreateGenre, json!({"name": "Action", "slug": "action"})),
            (
                ActionKind::UpdateSeriesGenres,
                json!({"series_id": id, "genre_ids": [id]}),
            ),
        ];
        for (kind, params) in cases {
            assert_eq!(QueryAction::parse(kind, params).unwrap().kind(), kind);
        }
    }
}
