//! Core data structures for the pixelgenesis simulation.

pub mod environment;
pub mod genome;
pub mod grid;
pub mod organism;
