//! SQLite schema definitions
//!
//! `SCHEMA` always describes the latest version. Fresh databases get it in
//! one step; older ones are upgraded through `migrations`.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Users
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE CHECK(length(email) >= 3),
    password_hash TEXT NOT NULL,
    username TEXT NOT NULL,
    points INTEGER NOT NULL DEFAULT 0 CHECK(points >= 0),
    co2_saved REAL NOT NULL DEFAULT 0 CHECK(co2_saved >= 0),
    created_at INTEGER NOT NULL
);

-- =============================================================================
-- 2. Habits (append-only log, references users)
-- =============================================================================
CREATE TABLE IF NOT EXISTS habits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    action TEXT NOT NULL CHECK(length(action) >= 1),
    notes TEXT NOT NULL DEFAULT '',
    co2_impact REAL NOT NULL,
    points_awarded INTEGER NOT NULL,
    date TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_habits_user_action ON habits(user_id, action);

-- =============================================================================
-- 3. Challenges (reference data)
-- =============================================================================
CREATE TABLE IF NOT EXISTS challenges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    reward_points INTEGER NOT NULL CHECK(reward_points >= 0),
    target_type TEXT NOT NULL,
    target_value INTEGER NOT NULL CHECK(target_value > 0),
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_challenges_target_type ON challenges(target_type);

-- =============================================================================
-- 4. User challenges (references users + challenges)
-- =============================================================================
CREATE TABLE IF NOT EXISTS user_challenges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    challenge_id INTEGER NOT NULL REFERENCES challenges(id) ON DELETE CASCADE,
    progress_value INTEGER NOT NULL DEFAULT 0 CHECK(progress_value >= 0),
    completed INTEGER NOT NULL DEFAULT 0 CHECK(completed IN (0, 1)),
    UNIQUE(user_id, challenge_id)
);

-- =============================================================================
-- Migration 2: per-day dashboard aggregation
-- =============================================================================
CREATE INDEX IF NOT EXISTS idx_habits_user_date ON habits(user_id, date);
"#;
