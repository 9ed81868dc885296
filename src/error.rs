use thiserror::Error;

/// Errors raised while building a graph or a palette, or while reading them from files.
/// The search procedures never fail once a solver has been built.
#[derive(Error, Debug)]
pub enum GraphError {
    /// the input file cannot be read
    #[error("unable to read {filename}: {source}")]
    Io {
        /// file that was requested
        filename: String,
        /// underlying I/O error
        source: std::io::Error,
    },
    /// the JSON graph description cannot be deserialized
    #[error("ill-formed JSON graph: {0}")]
    Json(#[from] serde_json::Error),
    /// the DIMACS file does not follow the `p edge` / `e a b` format
    #[error("ill-formed DIMACS input: {0}")]
    Dimacs(String),
    /// two nodes share the same identifier
    #[error("vertex {0} is declared twice")]
    DuplicateVertex(String),
    /// an edge endpoint is not a declared node
    #[error("edge {from} -> {to} references an unknown vertex {unknown}")]
    UnknownVertex {
        /// source of the edge
        from: String,
        /// target of the edge
        to: String,
        /// the endpoint that is not declared
        unknown: String,
    },
    /// an edge links a vertex to itself (such a graph has no coloring)
    #[error("vertex {0} is adjacent to itself")]
    SelfLoop(String),
    /// no color to try
    #[error("the palette is empty")]
    EmptyPalette,
    /// a palette token appears twice
    #[error("color {0} appears twice in the palette")]
    DuplicateColor(String),
    /// a solution file assigns a token that is not in the palette
    #[error("unknown color {color} for vertex {vertex}")]
    UnknownColor {
        /// vertex identifier
        vertex: String,
        /// color token found
        color: String,
    },
}
