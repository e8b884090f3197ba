//! Board test modules.
