//! SQL of the catalog repository. Every value is a bind parameter.

// ============================================================
// RESULT ORDER
// ============================================================

/// Newest first. Applied to listings with an `updated_at` column.
pub const ORDER_RECENT: &str = "updated_at DESC";

pub const ORDER_NAME: &str = "name ASC";

pub const ORDER_CHAPTER_NUMBER: &str = "chapter_number DESC";

pub const ORDER_PERIOD_VIEWS: &str = "period_views DESC";

pub const ORDER_LATEST_CHAPTER: &str = "latest_chapter_at DESC NULLS LAST";

// ============================================================
// SERIES READS
// ============================================================

pub const ALL_SERIES: &str = "SELECT * FROM series ORDER BY updated_at DESC";

pub const SERIES_BY_ID: &str = "SELECT * FROM series WHERE id = $1";

pub const SERIES_WITH_CHAPTER_COUNT: &str = r"
SELECT s.*, COALESCE(c.count, 0)::int AS chapters_count
FROM series s
LEFT JOIN (
    SELECT series_id, COUNT(*)::int AS count
    FROM chapters GROUP BY series_id
) c ON s.id = c.series_id
ORDER BY s.updated_at DESC
";

pub const SERIES_VIEWS: &str = r"
SELECT to_json(COALESCE((SELECT total_views FROM series WHERE id = $1), 0)) AS data
";

/// `$1` series limit, `$2` chapters per series.
pub const SERIES_WITH_LATEST_CHAPTERS: &str = r"
SELECT s.*,
    (SELECT MAX(created_at) FROM chapters WHERE series_id = s.id) AS latest_chapter_at,
    COALESCE((
        SELECT json_agg(latest)
        FROM (
            SELECT DISTINCT ON (ch.chapter_number) ch.*
            FROM chapters ch
            WHERE ch.series_id = s.id
            ORDER BY ch.chapter_number DESC, ch.created_at DESC
            LIMIT $2
        ) latest
    ), '[]'::json) AS chapters
FROM series s
ORDER BY latest_chapter_at DESC NULLS LAST
LIMIT $1
";

pub const FEATURED_SERIES: &str = r#"
SELECT s.*,
    COALESCE((SELECT COUNT(*) FROM chapters WHERE series_id = s.id), 0)::int AS chapters_count,
    COALESCE((SELECT COUNT(*) FROM chapters WHERE series_id = s.id), 0)::int AS "chaptersCount",
    COALESCE((
        SELECT json_agg(json_build_object('id', g.id, 'name', g.name, 'slug', g.slug))
        FROM series_genres sg
        JOIN genres g ON g.id = sg.genre_id
        WHERE sg.series_id = s.id
    ), '[]'::json) AS genres
FROM series s
WHERE s.is_featured = true
ORDER BY s.updated_at DESC
"#;

/// `$1` page size, `$2` offset.
pub const BROWSE_SERIES: &str = r#"
SELECT s.id, s.title, s.cover_url, s.status, s.type, s.updated_at,
    COALESCE((SELECT COUNT(*) FROM chapters WHERE series_id = s.id), 0)::int AS chapters_count,
    COALESCE((SELECT COUNT(*) FROM chapters WHERE series_id = s.id), 0)::int AS "chaptersCount"
FROM series s
ORDER BY s.updated_at DESC
LIMIT $1
OFFSET $2
"#;

// ============================================================
// POPULARITY
// ============================================================

/// `$1` limit.
pub const POPULAR_ALL_TIME: &str = r"
SELECT id, title, cover_url, status, type, total_views, total_views AS period_views
FROM series
ORDER BY total_views DESC
LIMIT $1
";

/// `$1` window in days, `$2` limit. Series without views in the window are omitted.
pub const POPULAR_IN_WINDOW: &str = r"
SELECT s.id, s.title, s.cover_url, s.status, s.type, s.total_views,
    COUNT(cv.id)::bigint AS period_views
FROM series s
JOIN chapter_views cv ON cv.series_id = s.id
    AND cv.viewed_at >= NOW() - make_interval(days => $1)
GROUP BY s.id
ORDER BY COUNT(cv.id) DESC
LIMIT $2
";

/// Wraps a popularity query (as `{inner}`) and attaches each series' genres.
pub const WITH_GENRES: &str = r"
SELECT p.*,
    COALESCE((
        SELECT json_agg(json_build_object('id', g.id, 'name', g.name, 'slug', g.slug))
        FROM series_genres sg
        JOIN genres g ON g.id = sg.genre_id
        WHERE sg.series_id = p.id
    ), '[]'::json) AS genres
FROM ({inner}) p
ORDER BY p.period_views DESC
";

// ============================================================
// SEARCH
// ============================================================

/// `$1` text, `$2` status, `$3` type, `$4` limit, `$5` offset, `$6` genre ids
/// (jsonb array or NULL). `{order}` is one of the `SEARCH_ORDER_*` fragments.
///
/// Genre filtering happens after paging, so a page may come back short.
pub const SEARCH_SERIES: &str = r"
WITH page AS (
    SELECT s.id, s.title, s.alternative_titles, s.description,
        s.cover_url, s.status, s.type, s.rating, s.is_featured, s.updated_at,
        COALESCE((SELECT COUNT(*) FROM chapters WHERE series_id = s.id), 0)::int AS chapters_count,
        CASE
            WHEN $1::text IS NULL THEN 1.0
            WHEN LOWER(s.title) = LOWER($1::text) THEN 1.0
            WHEN LOWER(s.title) LIKE LOWER($1::text) || '%' THEN 0.9
            WHEN LOWER(s.title) LIKE '%' || LOWER($1::text) || '%' THEN 0.7
            ELSE 0.3
        END AS relevance_score
    FROM series s
    WHERE ($1::text IS NULL
            OR LOWER(s.title) LIKE '%' || LOWER($1::text) || '%'
            OR s.alternative_titles::text ILIKE '%' || $1::text || '%'
            OR s.description ILIKE '%' || $1::text || '%')
        AND ($2::text IS NULL OR s.status = $2::text)
        AND ($3::text IS NULL OR s.type = $3::text)
    ORDER BY {order}
    LIMIT $4
    OFFSET $5
)
SELECT COALESCE(json_agg(page ORDER BY {order}), '[]'::json) AS data
FROM page
WHERE $6::jsonb IS NULL
    OR EXISTS (
        SELECT 1 FROM series_genres sg
        WHERE sg.series_id = page.id
            AND sg.genre_id::text IN (SELECT jsonb_array_elements_text($6::jsonb))
    )
";

pub const SEARCH_ORDER_RELEVANCE: &str = "relevance_score DESC, updated_at DESC";

pub const SEARCH_ORDER_LATEST: &str = "updated_at DESC";

// ============================================================
// CHAPTERS & GENRES READS
// ============================================================

pub const CHAPTERS_OF_SERIES: &str =
    "SELECT * FROM chapters WHERE series_id = $1 ORDER BY chapter_number DESC";

pub const CHAPTER_WITH_PAGES: &str = r"
SELECT json_build_object(
    'chapter', (SELECT row_to_json(c) FROM chapters c WHERE c.id = $1),
    'pages', COALESCE((
        SELECT json_agg(p ORDER BY p.page_number ASC)
        FROM chapter_pages p
        WHERE p.chapter_id = $1
    ), '[]'::json)
) AS data
";

pub const ALL_GENRES: &str = "SELECT * FROM genres ORDER BY name ASC";

pub const GENRES_OF_SERIES: &str = r"
SELECT g.* FROM genres g
JOIN series_genres sg ON g.id = sg.genre_id
WHERE sg.series_id = $1
ORDER BY g.name ASC
";

pub const ALL_SERIES_GENRES: &str = "SELECT series_id, genre_id FROM series_genres";

// ============================================================
// VIEWS
// ============================================================

/// `$1` viewer hash.
pub const RECENT_VIEWS_BY_VIEWER: &str = r"
SELECT to_json(COUNT(*)) AS data
FROM chapter_views
WHERE viewer_hash = $1
    AND viewed_at > NOW() - INTERVAL '1 minute'
";

/// `$1` chapter id, `$2` viewer hash.
pub const VIEWED_WITHIN_HOUR: &str = r"
SELECT to_json(EXISTS (
    SELECT 1 FROM chapter_views
    WHERE chapter_id = $1
        AND viewer_hash = $2
        AND viewed_at > NOW() - INTERVAL '1 hour'
)) AS data
";

pub const INSERT_VIEW: &str = r"
INSERT INTO chapter_views (chapter_id, series_id, viewer_hash)
VALUES ($1, $2, $3)
";

pub const INCREMENT_SERIES_VIEWS: &str =
    "UPDATE series SET total_views = total_views + 1 WHERE id = $1";

// ============================================================
// WRITES
// ============================================================

pub const INSERT_SERIES: &str = r"
INSERT INTO series (title, alternative_titles, description, cover_url, banner_url,
    status, type, rating, is_featured)
VALUES ($1, ARRAY(SELECT jsonb_array_elements_text($2::jsonb)), $3, $4, $5,
    $6, $7, $8::numeric, $9)
RETURNING *
";

/// Absent fields keep their value except `rating`, which is always written.
pub const UPDATE_SERIES: &str = r"
UPDATE series SET
    title = COALESCE($2, title),
    alternative_titles = CASE
        WHEN $3::jsonb IS NULL THEN alternative_titles
        ELSE ARRAY(SELECT jsonb_array_elements_text($3::jsonb))
    END,
    description = COALESCE($4, description),
    cover_url = COALESCE($5, cover_url),
    banner_url = COALESCE($6, banner_url),
    status = COALESCE($7, status),
    type = COALESCE($8, type),
    rating = $9::numeric,
    is_featured = COALESCE($10, is_featured),
    updated_at = NOW()
WHERE id = $1
RETURNING *
";

pub const DELETE_SERIES: &str = "DELETE FROM series WHERE id = $1";

/// Inserts the chapter, its pages (`$6`, jsonb array), and touches the series
/// in one statement.
pub const INSERT_CHAPTER: &str = r"
WITH chapter AS (
    INSERT INTO chapters (series_id, chapter_number, title, chapter_type, pdf_url)
    VALUES ($1, $2::numeric, $3, $4, $5)
    RETURNING *
),
pages AS (
    INSERT INTO chapter_pages (chapter_id, page_number, image_url)
    SELECT chapter.id, (page->>'page_number')::int, page->>'image_url'
    FROM chapter, jsonb_array_elements($6::jsonb) AS page
),
touched AS (
    UPDATE series SET updated_at = NOW() WHERE id = $1
)
SELECT row_to_json(chapter) AS data FROM chapter
";

/// `title` is always written.
pub const UPDATE_CHAPTER: &str = r"
UPDATE chapters SET
    chapter_number = COALESCE($2::numeric, chapter_number),
    title = $3
WHERE id = $1
RETURNING *
";

pub const DELETE_CHAPTER: &str = "DELETE FROM chapters WHERE id = $1";

pub const INSERT_GENRE: &str = "INSERT INTO genres (name, slug) VALUES ($1, $2) RETURNING *";

pub const UPDATE_GENRE: &str =
    "UPDATE genres SET name = $2, slug = $3 WHERE id = $1 RETURNING *";

pub const DELETE_GENRE: &str = "DELETE FROM genres WHERE id = $1";

pub const CLEAR_SERIES_GENRES: &str = "DELETE FROM series_genres WHERE series_id = $1";

/// `$2` genre ids as a jsonb array.
pub const INSERT_SERIES_GENRES: &str = r"
INSERT INTO series_genres (series_id, genre_id)
SELECT DISTINCT $1, genre_id::uuid
FROM jsonb_array_elements_text($2::jsonb) AS genre_id
";
