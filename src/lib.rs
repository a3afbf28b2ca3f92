//! Happiness-driven Golden Age / Dark Age cycles for a turn-based civilization simulation.
//!
//! Re-exports the simulation for the binary and integration tests.

pub mod simulation;
