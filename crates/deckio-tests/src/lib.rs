//! Integration test crate for deckio.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It drives deckio-device sessions over the simulated engine and checks
//! them against deckio-core metadata.

#[cfg(test)]
mod lifecycle;

#[cfg(test)]
mod ordering;

#[cfg(test)]
mod metadata;

#[cfg(test)]
mod config;
