// src/constants.rs
//
// Application-wide constants. Each constant is documented with its purpose
// and usage context.

/// Delay in milliseconds after writing the HTML board before opening the browser.
///
/// On macOS the browser needs a brief moment for the file to be fully written
/// and indexed before opening. Without it the browser may show an empty page.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;

/// Lifetime requested for resolved image URLs, matching the hosted store's default.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_URL_EXPIRY_SECS: u64 = 900;

/// Key prefix under which images are stored (public access level).
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_STORAGE_PREFIX: &str = "public/";

/// TCP connect timeout for both backend clients.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Directory below the platform config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "notegrid";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Page title of the rendered board
pub const BOARD_TITLE: &str = "My Notes App";
