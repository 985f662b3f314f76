//! Environment source: `TREEFS_SHELL__USER=alice` sets `shell.user`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("TREEFS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
