//! Headless front end for the pixelgenesis engine.
//!
//! [`model`] re-exports the engine surface; [`app`] drives it from the
//! command line.

pub mod app;
pub mod model;
