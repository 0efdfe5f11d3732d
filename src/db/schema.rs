//! Database schema and migrations for fileshare.
//!
//! Migrations are applied in order when the database is opened. Each entry
//! is a single SQL statement; the `schema_version` table records progress.

/// Database migrations.
#[cfg(feature = "sqlite")]
pub const MIGRATIONS: &[&str] = &[
    // v1: API keys, one capability per key
    r#"
CREATE TABLE api_keys (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    key         TEXT NOT NULL UNIQUE,
    key_type    TEXT NOT NULL,           -- 'upload', 'download', 'shorten', 'administer'
    is_enabled  INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
)
"#,
    // v2: Short links
    r#"
CREATE TABLE short_links (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    short_code         TEXT NOT NULL UNIQUE,
    original_filename  TEXT NOT NULL,
    is_private         INTEGER NOT NULL DEFAULT 1,
    is_enabled         INTEGER NOT NULL DEFAULT 1,
    created_at         TEXT NOT NULL DEFAULT (datetime('now'))
)
"#,
    // v3: Lookup index for link filenames
    r#"
CREATE INDEX idx_short_links_filename ON short_links(original_filename)
"#,
];

/// Database migrations.
#[cfg(all(feature = "postgres", not(feature = "sqlite")))]
pub const MIGRATIONS: &[&str] = &[
    // v1: API keys, one capability per key
    r#"
CREATE TABLE api_keys (
    id          BIGSERIAL PRIMARY KEY,
    key         TEXT NOT NULL UNIQUE,
    key_type    TEXT NOT NULL,
    is_enabled  BOOLEAN NOT NULL DEFAULT TRUE,
    created_at  TEXT NOT NULL DEFAULT TO_CHAR(NOW(), 'YYYY-MM-DD HH24:MI:SS')
)
"#,
    // v2: Short links
    r#"
CREATE TABLE short_links (
    id                 BIGSERIAL PRIMARY KEY,
    short_code         TEXT NOT NULL UNIQUE,
    original_filename  TEXT NOT NULL,
    is_private         BOOLEAN NOT NULL DEFAULT TRUE,
    is_enabled         BOOLEAN NOT NULL DEFAULT TRUE,
    created_at         TEXT NOT NULL DEFAULT TO_CHAR(NOW(), 'YYYY-MM-DD HH24:MI:SS')
)
"#,
    // v3: Lookup index for link filenames
    r#"
CREATE INDEX idx_short_links_filename ON short_links(original_filename)
"#,
];
