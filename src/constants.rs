//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! the remote endpoint and the built-in defaults so a rename only requires
//! changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "userfetch";

/// Crate version, as reported by `userfetch version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// `User-Agent` header sent with every remote read.
pub const USER_AGENT: &str = concat!("userfetch/", env!("CARGO_PKG_VERSION"));

/// Local config filename (e.g. `.userfetch.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".userfetch.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "userfetch";

/// Base endpoint for user records; a record lives at `<base>/<id>`.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Upper bound fed into the id draw. See [`crate::service::draw_user_id`].
pub const DEFAULT_MAX_USER_ID: u32 = 10;

/// Trigger throttle window in milliseconds.
pub const DEFAULT_THROTTLE_MS: u64 = 500;

/// Default log level when neither config nor environment sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Header printed above the display surface.
pub const HEADER: &str = "Get a random user";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_BASE_URL: &str = "USERFETCH_BASE_URL";
pub const ENV_THROTTLE_MS: &str = "USERFETCH_THROTTLE_MS";
pub const ENV_MAX_USER_ID: &str = "USERFETCH_MAX_USER_ID";
pub const ENV_LOG: &str = "USERFETCH_LOG";
