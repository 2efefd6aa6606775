//! Integration tests

mod bulk_import_tests;
mod config_tests;
mod workflow_tests;
