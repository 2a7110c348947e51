// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "EcoTrack";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "ecotrack";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".ecotrack";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "ecotrack.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "ECOTRACK_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "ECOTRACK_DEBUG";

/// Environment variable for server host
pub const ENV_HOST: &str = "ECOTRACK_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "ECOTRACK_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "ECOTRACK_LOG";

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "ECOTRACK_DATA_DIR";

/// Environment variable holding the token signing secret
pub const ENV_SECRET_KEY: &str = "ECOTRACK_SECRET_KEY";

/// Environment variable for session lifetime
pub const ENV_SESSION_TTL_DAYS: &str = "ECOTRACK_SESSION_TTL_DAYS";

/// Environment variable to skip seeding the default challenges
pub const ENV_NO_SEED: &str = "ECOTRACK_NO_SEED";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5000;

/// Default request body limit (1 MiB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Body limit for register/login
pub const AUTH_BODY_LIMIT: usize = 64 * 1024;

/// Graceful shutdown timeout for background tasks
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Authentication
// =============================================================================

/// Default session TTL in days
pub const DEFAULT_SESSION_TTL_DAYS: u32 = 30;

/// Upper bound accepted for the session TTL
pub const MAX_SESSION_TTL_DAYS: u32 = 365;

/// File (inside the data dir) holding the generated signing key
pub const SIGNING_KEY_FILENAME: &str = "signing.key";

/// Signing key length in bytes
pub const SIGNING_KEY_LEN: usize = 32;

/// Minimum accepted length for a secret supplied through the environment
pub const MIN_SECRET_KEY_LEN: usize = 16;

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "ecotrack.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -64000 = 64MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Habits & Challenges
// =============================================================================

/// Maximum length of the free-text habit notes
pub const MAX_NOTES_LENGTH: usize = 500;

/// Maximum length of an action name
pub const MAX_ACTION_LENGTH: usize = 100;

/// Length of a seeded challenge window in days
pub const CHALLENGE_WINDOW_DAYS: i64 = 7;

/// Habit date format (YYYY-MM-DD)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of days shown in the dashboard progress chart
pub const PROGRESS_CHART_DAYS: i64 = 7;

// =============================================================================
// Ranking
// =============================================================================

/// Number of users returned by the leaderboard
pub const RANKING_LIMIT: i64 = 100;
