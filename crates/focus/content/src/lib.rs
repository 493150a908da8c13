//! Node registry and built-in catalog for the focus engine.
//!
//! This crate houses the content side of the system: the registry that
//! turns string keys into fresh node instances, the default domain color
//! table (data-driven via RON), and a built-in node catalog. The engine in
//! `focus-core` never depends on any of this; collaborators construct a
//! [`NodeRegistry`] once at startup and share it by reference.

pub mod builtin;
pub mod colors;
pub mod registry;

pub use colors::Palette;
pub use registry::NodeRegistry;
