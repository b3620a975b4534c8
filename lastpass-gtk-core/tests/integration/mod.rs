//! Integration test modules

mod browse_flow_tests;
mod login_flow_tests;
