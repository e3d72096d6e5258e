//! CLI integration tests for crossbuild.
//!
//! The Go toolchain and ISCC are replaced by shell scripts, so these run on
//! unix hosts only.

#![cfg(unix)]

mod build_tests;
mod common;
