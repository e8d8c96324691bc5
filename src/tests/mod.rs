//! Cross-module test suite for the playground
//!
//! Unit tests live next to the code they cover; the suites here wire the
//! loader, registry, relay, and view together the way a host would.

#[cfg(test)]
mod support;
