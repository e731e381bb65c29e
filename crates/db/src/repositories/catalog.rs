//! Catalog repository executing Query Gateway actions.
//!
//! Postgres renders every result as JSON (`json_agg`, `row_to_json`); the
//! repository hands it back untouched as the response `data`.

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement,
    TransactionTrait, Value as DbValue,
};
use serde_json::{Map, Value, json};
use toonshelf_core::query::params::{
    BROWSE_PAGE_SIZE, BrowseParams, ChapterUpdate, ChapterViewParams, LATEST_CHAPTERS_PER_SERIES,
    NewChapter, NewSeries, PopularParams, SearchParams, SearchSort, SeriesGenresUpdate,
    SeriesUpdate, VIEWS_PER_MINUTE,
};
use toonshelf_core::query::{CatalogStore, QueryAction, QueryError};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::catalog_sql as sql;

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Viewer exceeded the per-minute view allowance.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Database error.
    #[error("{0}")]
    Database(#[from] DbErr),
}

impl From<CatalogError> for QueryError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::RateLimited => Self::RateLimited,
            CatalogError::Database(e) => {
                error!(error = %e, "Catalog statement failed");
                Self::Database(e.to_string())
            }
        }
    }
}

/// One row carrying a JSON document in its `data` column.
#[derive(Debug, FromQueryResult)]
struct JsonRow {
    data: Value,
}

fn statement(query: &str, values: Vec<DbValue>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, query, values)
}

/// Runs a statement whose single row has a `data` column. No row reads as `null`.
async fn fetch_value<C: ConnectionTrait>(
    conn: &C,
    query: &str,
    values: Vec<DbValue>,
) -> Result<Value, DbErr> {
    let row = JsonRow::find_by_statement(statement(query, values))
        .one(conn)
        .await?;
    Ok(row.map_or(Value::Null, |r| r.data))
}

/// Wraps `query` so its rows come back as one JSON array in `order`.
///
/// The order has to be repeated inside `json_agg`: Postgres does not promise
/// to aggregate rows in the order the inner query produced them.
fn aggregate(query: &str, order: Option<&str>) -> String {
    let order = order.map(|o| format!(" ORDER BY {o}")).unwrap_or_default();
    format!("WITH t AS ({query}) SELECT COALESCE(json_agg(t{order}), '[]'::json) AS data FROM t")
}

/// All rows of `query` as a JSON array.
async fn fetch_all<C: ConnectionTrait>(
    conn: &C,
    query: &str,
    order: Option<&str>,
    values: Vec<DbValue>,
) -> Result<Value, DbErr> {
    fetch_value(conn, &aggregate(query, order), values).await
}

/// First row of `query` as a JSON object, or `null`.
async fn fetch_optional<C: ConnectionTrait>(
    conn: &C,
    query: &str,
    values: Vec<DbValue>,
) -> Result<Value, DbErr> {
    let wrapped = format!("WITH t AS ({query}) SELECT row_to_json(t) AS data FROM t LIMIT 1");
    fetch_value(conn, &wrapped, values).await
}

async fn execute<C: ConnectionTrait>(
    conn: &C,
    query: &str,
    values: Vec<DbValue>,
) -> Result<u64, DbErr> {
    let result = conn.execute(statement(query, values)).await?;
    Ok(result.rows_affected())
}

fn success() -> Value {
    json!({ "success": true })
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

fn id_array(ids: &[Uuid]) -> Value {
    Value::Array(ids.iter().map(|id| Value::String(id.to_string())).collect())
}

fn popular_statement(params: &PopularParams, with_genres: bool) -> (String, Vec<DbValue>) {
    let limit = i64::from(params.limit());
    let (inner, values): (&str, Vec<DbValue>) = match params.time_period.window_days() {
        None => (sql::POPULAR_ALL_TIME, vec![limit.into()]),
        Some(days) => (sql::POPULAR_IN_WINDOW, vec![days.into(), limit.into()]),
    };
    let query = if with_genres {
        sql::WITH_GENRES.replace("{inner}", inner)
    } else {
        inner.to_string()
    };
    (query, values)
}

fn search_statement(params: &SearchParams) -> (String, Vec<DbValue>) {
    let order = match params.sort_by {
        SearchSort::Relevance => sql::SEARCH_ORDER_RELEVANCE,
        SearchSort::Latest => sql::SEARCH_ORDER_LATEST,
    };
    let values = vec![
        params.query().map(str::to_owned).into(),
        params.status().map(str::to_owned).into(),
        params.series_type().map(str::to_owned).into(),
        i64::from(params.limit()).into(),
        i64::from(params.offset()).into(),
        params.genres().map(id_array).into(),
    ];
    (sql::SEARCH_SERIES.replace("{order}", order), values)
}

fn browse_page(params: &BrowseParams, series: Value) -> Value {
    let returned = series.as_array().map_or(0, Vec::len);
    let mut page = Map::new();
    page.insert("series".to_string(), series);
    if let Some(next) = params.next_page(returned) {
        page.insert("nextPage".to_string(), json!(next));
    }
    Value::Object(page)
}

/// Catalog repository for the Query Gateway.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Runs one action and returns its `data` payload.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::RateLimited` for throttled view recording, or a
    /// database error.
    pub async fn run(&self, action: QueryAction) -> Result<Value, CatalogError> {
        let db = &self.db;
        debug!(action = %action.kind(), "Running catalog action");

        let data = match action {
            QueryAction::GetAllSeries => {
                fetch_all(db, sql::ALL_SERIES, Some(sql::ORDER_RECENT), vec![]).await?
            }
            QueryAction::GetSeries(p) => {
                fetch_optional(db, sql::SERIES_BY_ID, vec![p.id.into()]).await?
            }
            QueryAction::GetSeriesWithChapterCount => {
                let order = Some(sql::ORDER_RECENT);
                fetch_all(db, sql::SERIES_WITH_CHAPTER_COUNT, order, vec![]).await?
            }
            QueryAction::GetChapters(p) => {
                fetch_all(
                    db,
                    sql::CHAPTERS_OF_SERIES,
                    Some(sql::ORDER_CHAPTER_NUMBER),
                    vec![p.series_id.into()],
                )
                .await?
            }
            QueryAction::GetChapter(p) => {
                fetch_value(db, sql::CHAPTER_WITH_PAGES, vec![p.id.into()]).await?
            }
            QueryAction::GetGenres => {
                fetch_all(db, sql::ALL_GENRES, Some(sql::ORDER_NAME), vec![]).await?
            }
            QueryAction::GetSeriesGenres(p) => {
                fetch_all(
                    db,
                    sql::GENRES_OF_SERIES,
                    Some(sql::ORDER_NAME),
                    vec![p.series_id.into()],
                )
                .await?
            }
            QueryAction::GetAllSeriesGenres => {
                fetch_all(db, sql::ALL_SERIES_GENRES, None, vec![]).await?
            }
            QueryAction::GetPopularSeries(p) => {
                let (query, values) = popular_statement(&p, false);
                fetch_all(db, &query, Some(sql::ORDER_PERIOD_VIEWS), values).await?
            }
            QueryAction::GetPopularSeriesWithGenres(p) => {
                let (query, values) = popular_statement(&p, true);
                fetch_all(db, &query, Some(sql::ORDER_PERIOD_VIEWS), values).await?
            }
            QueryAction::GetSeriesViews(p) => {
                fetch_value(db, sql::SERIES_VIEWS, vec![p.series_id.into()]).await?
            }
            QueryAction::GetSeriesWithLatestChapters(p) => {
                let values = vec![
                    i64::from(p.limit()).into(),
                    i64::from(LATEST_CHAPTERS_PER_SERIES).into(),
                ];
                fetch_all(
                    db,
                    sql::SERIES_WITH_LATEST_CHAPTERS,
                    Some(sql::ORDER_LATEST_CHAPTER),
                    values,
                )
                .await?
            }
            QueryAction::GetFeaturedSeries => {
                fetch_all(db, sql::FEATURED_SERIES, Some(sql::ORDER_RECENT), vec![]).await?
            }
            QueryAction::GetBrowseSeries(p) => {
                let offset = i64::try_from(p.offset()).unwrap_or(i64::MAX);
                let values = vec![i64::from(BROWSE_PAGE_SIZE).into(), offset.into()];
                let series =
                    fetch_all(db, sql::BROWSE_SERIES, Some(sql::ORDER_RECENT), values).await?;
                browse_page(&p, series)
            }
            QueryAction::SearchSeries(p) => self.search(&p).await?,
            QueryAction::RecordChapterView(p) => self.record_view(&p).await?,
            QueryAction::CreateSeries(p) => self.create_series(p).await?,
            QueryAction::UpdateSeries(p) => self.update_series(p).await?,
            QueryAction::DeleteSeries(p) => {
                let removed = execute(db, sql::DELETE_SERIES, vec![p.id.into()]).await?;
                info!(series_id = %p.id, removed, "Series deleted");
                success()
            }
            QueryAction::CreateChapter(p) => self.create_chapter(p).await?,
            QueryAction::UpdateChapter(p) => self.update_chapter(p).await?,
            QueryAction::DeleteChapter(p) => {
                let removed = execute(db, sql::DELETE_CHAPTER, vec![p.id.into()]).await?;
                info!(chapter_id = %p.id, removed, "Chapter deleted");
                success()
            }
            QueryAction::CreateGenre(p) => {
                fetch_optional(db, sql::INSERT_GENRE, vec![p.name.into(), p.slug.into()]).await?
            }
            QueryAction::UpdateGenre(p) => {
                let values = vec![p.id.into(), p.name.into(), p.slug.into()];
                fetch_optional(db, sql::UPDATE_GENRE, values).await?
            }
            QueryAction::DeleteGenre(p) => {
                let removed = execute(db, sql::DELETE_GENRE, vec![p.id.into()]).await?;
                info!(genre_id = %p.id, removed, "Genre deleted");
                success()
            }
            QueryAction::UpdateSeriesGenres(p) => self.replace_series_genres(p).await?,
        };

        Ok(data)
    }

    async fn search(&self, params: &SearchParams) -> Result<Value, DbErr> {
        if !params.has_criteria() {
            return Ok(json!([]));
        }
        let (query, values) = search_statement(params);
        fetch_value(&self.db, &query, values).await
    }

    async fn record_view(&self, params: &ChapterViewParams) -> Result<Value, CatalogError> {
        let viewer = params.viewer_hash();

        if let Some(viewer) = viewer {
            let recent = fetch_value(&self.db, sql::RECENT_VIEWS_BY_VIEWER, vec![viewer.into()])
                .await?
                .as_i64()
                .unwrap_or(0);
            if recent >= VIEWS_PER_MINUTE {
                warn!(recent, "View rate limit exceeded");
                return Err(CatalogError::RateLimited);
            }

            let seen = fetch_value(
                &self.db,
                sql::VIEWED_WITHIN_HOUR,
                vec![params.chapter_id.into(), viewer.into()],
            )
            .await?
            .as_bool()
            .unwrap_or(false);
            if seen {
                return Ok(json!({ "success": true, "recorded": false }));
            }
        }

        let txn = self.db.begin().await?;
        execute(
            &txn,
            sql::INSERT_VIEW,
            vec![
                params.chapter_id.into(),
                params.series_id.into(),
                viewer.map(str::to_owned).into(),
            ],
        )
        .await?;
        execute(&txn, sql::INCREMENT_SERIES_VIEWS, vec![params.series_id.into()]).await?;
        txn.commit().await?;

        Ok(json!({ "success": true, "recorded": true }))
    }

    async fn create_series(&self, series: NewSeries) -> Result<Value, DbErr> {
        let values = vec![
            series.title.clone().into(),
            string_array(&series.alternative_titles).into(),
            series.description.clone().into(),
            series.cover_url.clone().into(),
            series.banner_url.clone().into(),
            series.status().to_owned().into(),
            series.series_type().to_owned().into(),
            series.rating.into(),
            series.is_featured.into(),
        ];
        let created = fetch_optional(&self.db, sql::INSERT_SERIES, values).await?;
        info!(title = %series.title, "Series created");
        Ok(created)
    }

    async fn update_series(&self, update: SeriesUpdate) -> Result<Value, DbErr> {
        let id = update.id;
        let values = vec![
            id.into(),
            update.title.into(),
            update
                .alternative_titles
                .as_deref()
                .map(string_array)
                .into(),
            update.description.into(),
            update.cover_url.into(),
            update.banner_url.into(),
            update.status.into(),
            update.series_type.into(),
            update.rating.into(),
            update.is_featured.into(),
        ];
        let updated = fetch_optional(&self.db, sql::UPDATE_SERIES, values).await?;
        info!(series_id = %id, found = !updated.is_null(), "Series updated");
        Ok(updated)
    }

    async fn create_chapter(&self, chapter: NewChapter) -> Result<Value, DbErr> {
        let pages = Value::Array(
            chapter
                .pages
                .iter()
                .map(|p| json!({ "page_number": p.page_number, "image_url": p.image_url }))
                .collect(),
        );
        let page_count = chapter.pages.len();
        let values = vec![
            chapter.series_id.into(),
            chapter.chapter_number.into(),
            chapter.title.clone().into(),
            chapter.chapter_type().to_owned().into(),
            chapter.pdf_url.clone().into(),
            pages.into(),
        ];
        let created = fetch_value(&self.db, sql::INSERT_CHAPTER, values).await?;
        info!(
            series_id = %chapter.series_id,
            chapter_number = chapter.chapter_number,
            pages = page_count,
            "Chapter created"
        );
        Ok(created)
    }

    async fn update_chapter(&self, update: ChapterUpdate) -> Result<Value, DbErr> {
        let values = vec![
            update.id.into(),
            update.chapter_number.into(),
            update.title.into(),
        ];
        fetch_optional(&self.db, sql::UPDATE_CHAPTER, values).await
    }

    async fn replace_series_genres(&self, update: SeriesGenresUpdate) -> Result<Value, DbErr> {
        let txn = self.db.begin().await?;
        execute(&txn, sql::CLEAR_SERIES_GENRES, vec![update.series_id.into()]).await?;
        if !update.genre_ids.is_empty() {
            execute(
                &txn,
                sql::INSERT_SERIES_GENRES,
                vec![update.series_id.into(), id_array(&update.genre_ids).into()],
            )
            .await?;
        }
        txn.commit().await?;

        info!(
            series_id = %update.series_id,
            genres = update.genre_ids.len(),
            "Series genres replaced"
        );
        Ok(success())
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn execute(&self, action: QueryAction) -> Result<Value, QueryError> {
        Ok(self.run(action).await?)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
