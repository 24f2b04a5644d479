//! Core engine primitives shared by the cards and engine modules.
//!
//! Currently this is just the deterministic RNG; it lives in its own
//! module so randomness stays an explicit, injectable dependency.

pub mod rng;

pub use rng::GameRng;
