//! Data definitions shared by the kinetik engine and its front-ends.
//!
//! Everything here is plain data: species and reaction declarations, the
//! reaction-equation notation, and the on-disk network file layout.

pub mod file_formats;
pub mod reaction;
pub mod settings;
pub mod species;
