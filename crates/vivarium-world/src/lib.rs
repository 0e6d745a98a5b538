//! World geometry and static resources for the Vivarium simulation.
//!
//! # Modules
//!
//! - [`bounds`] -- The rectangular playfield and its clamping rules.
//! - [`error`] -- Error types for world construction.
//! - [`resources`] -- [`ResourceRegistry`], the store of food, water and
//!   obstacles with nearest-of-kind lookup.

pub mod bounds;
pub mod error;
pub mod resources;

pub use bounds::WorldBounds;
pub use error::WorldError;
pub use resources::ResourceRegistry;
