//! Property-based tests for the rope and the directory index

mod index_props;
mod rope_props;
