//! Integration tests for the treefs namespace

mod config_loading;
mod content_buffer;
mod directory_index;
mod namespace;
mod shell_session;
