//! SQL schema for the catalogue SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
///
/// Word counts are character counts of `content` with line breaks removed,
/// which for classical Chinese verse is one word per character.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS Authors (
    author_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    image_url   TEXT
);

CREATE TABLE IF NOT EXISTS Poems (
    poem_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT NOT NULL,
    author_id INTEGER NOT NULL REFERENCES Authors(author_id) ON DELETE CASCADE,
    content   TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS poems_author_idx ON Poems(author_id);
CREATE INDEX IF NOT EXISTS authors_name_idx ON Authors(name);

-- Reporting views. Read-only; never written by the service.

CREATE VIEW IF NOT EXISTS stats_view AS
    SELECT 1 AS id, 'poets' AS name, (SELECT COUNT(*) FROM Authors) AS value
    UNION ALL
    SELECT 2, 'poems', (SELECT COUNT(*) FROM Poems)
    UNION ALL
    SELECT 3, 'words', (
        SELECT COALESCE(SUM(LENGTH(REPLACE(REPLACE(content, char(13), ''), char(10), ''))), 0)
        FROM Poems
    );

CREATE VIEW IF NOT EXISTS echart_two AS
    SELECT a.author_id AS author_id,
           a.name      AS author_name,
           COUNT(p.poem_id) AS poem_count,
           COALESCE(SUM(LENGTH(REPLACE(REPLACE(p.content, char(13), ''), char(10), ''))), 0) AS word_count
    FROM Authors a
    JOIN Poems p ON p.author_id = a.author_id
    GROUP BY a.author_id, a.name;

CREATE VIEW IF NOT EXISTS data_table AS
    SELECT a.author_id AS author_id,
           a.name      AS author_name,
           'Tang'      AS dynasty,
           COUNT(p.poem_id) AS poem_count,
           COALESCE(SUM(LENGTH(REPLACE(REPLACE(p.content, char(13), ''), char(10), ''))), 0) AS word_count
    FROM Authors a
    JOIN Poems p ON p.author_id = a.author_id
    GROUP BY a.author_id, a.name;

PRAGMA user_version = 1;
";
