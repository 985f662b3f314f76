//! Merge rules: defaults and override order.
//!
//! Later sources replace earlier ones key by key. Lists such as
//! `shell.seed_directories` are replaced whole, never concatenated, so they
//! are left to serde defaults instead of being registered here.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("shell.color", true)?
        .set_default("shell.debug", false)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
