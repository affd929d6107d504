//! Database schema and migrations for folio.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - admins table
    r#"
-- Admins table for dashboard authentication
CREATE TABLE admins (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_admins_email ON admins(email);
"#,
    // v2: Refresh tokens for JWT session management
    r#"
-- Refresh tokens issued to logged-in admins
CREATE TABLE refresh_tokens (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    admin_id    INTEGER NOT NULL REFERENCES admins(id) ON DELETE CASCADE,
    token       TEXT NOT NULL UNIQUE,
    expires_at  TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    revoked_at  TEXT
);

CREATE INDEX idx_refresh_tokens_token ON refresh_tokens(token);
CREATE INDEX idx_refresh_tokens_admin_id ON refresh_tokens(admin_id);
"#,
    // v3: Contact messages submitted through the public contact form
    r#"
-- Contact messages from site visitors
CREATE TABLE contact_messages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    subject     TEXT NOT NULL,
    message     TEXT NOT NULL,
    is_read     INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_contact_messages_created_at ON contact_messages(created_at);
CREATE INDEX idx_contact_messages_is_read ON contact_messages(is_read);
"#,
    // v4: Contact info singleton shown on the public site
    r#"
-- Contact info (single row, id is fixed to 1)
CREATE TABLE contact_info (
    id          INTEGER PRIMARY KEY CHECK (id = 1),
    email       TEXT NOT NULL,
    phone       TEXT,
    linkedin    TEXT,
    github      TEXT,
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v5: Profile singleton for the public landing page
    r#"
-- Profile (single row, id is fixed to 1)
CREATE TABLE profile (
    id          INTEGER PRIMARY KEY CHECK (id = 1),
    name        TEXT NOT NULL,
    headline    TEXT NOT NULL,
    bio         TEXT NOT NULL,
    location    TEXT,
    avatar_url  TEXT,
    resume_url  TEXT,
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v6: Projects table for the portfolio section
    r#"
-- Portfolio projects
CREATE TABLE projects (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    tech_stack  TEXT NOT NULL DEFAULT '[]',  -- JSON array of strings
    image_url   TEXT,
    demo_url    TEXT,
    repo_url    TEXT,
    featured    INTEGER NOT NULL DEFAULT 0,
    sort_order  INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_projects_sort_order ON projects(sort_order);
CREATE INDEX idx_projects_featured ON projects(featured);
"#,
    // v7: Experience table for the work history section
    r#"
-- Work experience entries
CREATE TABLE experience (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    company      TEXT NOT NULL,
    role         TEXT NOT NULL,
    start_date   TEXT NOT NULL,
    end_date     TEXT,                         -- NULL while the role is current
    summary      TEXT NOT NULL,
    achievements TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    sort_order   INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX idx_experience_sort_order ON experience(sort_order);
"#,
    // v8: Skills table
    r#"
-- Skills grouped by category
CREATE TABLE skills (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    category    TEXT NOT NULL,
    sort_order  INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX idx_skills_category ON skills(category);
"#,
];
