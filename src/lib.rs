//! Parser core of a desktop OBJ model viewer.
//!
//! Loads Wavefront OBJ files through a memory-mapped, zero-copy scanner,
//! builds a fully owned [`scene::model::Model`], optionally rescales it into
//! the unit cube, and flattens it into the buffers a render layer uploads.

pub mod io;
pub mod scene;
