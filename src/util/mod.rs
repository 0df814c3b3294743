//! Utility functions module
//!
//! Contains helper functions for formatting hours, shares and text bars.

pub mod format;
