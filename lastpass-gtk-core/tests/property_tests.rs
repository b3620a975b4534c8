//! Property-based tests for the `lastpass-gtk` core library

mod properties;
