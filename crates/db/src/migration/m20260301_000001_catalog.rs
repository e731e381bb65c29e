//! Catalog tables read and written by the Query Gateway.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(SERIES_SQL).await?;
        db.execute_unprepared(CHAPTERS_SQL).await?;
        db.execute_unprepared(CHAPTER_PAGES_SQL).await?;
        db.execute_unprepared(GENRES_SQL).await?;
        db.execute_unprepared(SERIES_GENRES_SQL).await?;
        db.execute_unprepared(CHAPTER_VIEWS_SQL).await?;
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const SERIES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS series (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title TEXT NOT NULL,
    alternative_titles TEXT[] DEFAULT '{}',
    description TEXT,
    cover_url TEXT,
    banner_url TEXT,
    status TEXT NOT NULL DEFAULT 'ongoing',
    type TEXT NOT NULL DEFAULT 'manhwa',
    rating NUMERIC,
    is_featured BOOLEAN NOT NULL DEFAULT false,
    total_views BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CHAPTERS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS chapters (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    series_id UUID NOT NULL REFERENCES series(id) ON DELETE CASCADE,
    chapter_number NUMERIC NOT NULL,
    title TEXT,
    chapter_type TEXT NOT NULL DEFAULT 'images',
    pdf_url TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CHAPTER_PAGES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS chapter_pages (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    chapter_id UUID NOT NULL REFERENCES chapters(id) ON DELETE CASCADE,
    page_number INTEGER NOT NULL,
    image_url TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const GENRES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS genres (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const SERIES_GENRES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS series_genres (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    series_id UUID NOT NULL REFERENCES series(id) ON DELETE CASCADE,
    genre_id UUID NOT NULL REFERENCES genres(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (series_id, genre_id)
);
";

// No foreign keys: views are kept after their chapter or series is deleted.
const CHAPTER_VIEWS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS chapter_views (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    chapter_id UUID NOT NULL,
    series_id UUID NOT NULL,
    viewer_hash TEXT,
    viewed_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX IF NOT EXISTS idx_chapters_series_id ON chapters(series_id);
CREATE INDEX IF NOT EXISTS idx_chapter_pages_chapter_id ON chapter_pages(chapter_id);
CREATE INDEX IF NOT EXISTS idx_series_genres_series_id ON series_genres(series_id);
CREATE INDEX IF NOT EXISTS idx_series_genres_genre_id ON series_genres(genre_id);
CREATE INDEX IF NOT EXISTS idx_chapter_views_series_id ON chapter_views(series_id);
CREATE INDEX IF NOT EXISTS idx_chapter_views_viewed_at ON chapter_views(viewed_at);
CREATE INDEX IF NOT EXISTS idx_chapter_views_viewer_hash ON chapter_views(viewer_hash, viewed_at);
CREATE INDEX IF NOT EXISTS idx_series_updated_at ON series(updated_at DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS chapter_views;
DROP TABLE IF EXISTS series_genres;
DROP TABLE IF EXISTS genres;
DROP TABLE IF EXISTS chapter_pages;
DROP TABLE IF EXISTS chapters;
DROP TABLE IF EXISTS series;
";
