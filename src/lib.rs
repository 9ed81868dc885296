//! Graph coloring search (backtracking, backtracking + AC-3, backjumping), step by step

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// errors raised while reading instances and palettes
pub mod error;

/// coloring instance base trait, palette, validity checker
pub mod color;

/// JSON graph descriptions (and the map of Australia)
pub mod dataset;

/// read DIMACS formats
pub mod dimacs;

/// compact instance (adjacency lists + adjacency matrix)
pub mod compact_instance;

/// candidate colors of each vertex
pub mod domain;

/// helper and utility methods for executables
pub mod util;

/// search strategies for the graph coloring problem
pub mod search;
