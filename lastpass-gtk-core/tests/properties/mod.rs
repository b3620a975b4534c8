//! Property test modules

mod catalog_tests;
mod selection_tests;
