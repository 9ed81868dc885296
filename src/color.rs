use std::fmt::Debug;
use std::ops::Range;

use bit_set::BitSet;

use crate::error::GraphError;

/** Vertex Id (position of the vertex in the evaluation order) */
pub type VertexId = usize;

/** Color Id (position of the color in the palette) */
pub type ColorId = usize;

/** (possibly partial) coloring. coloring[v]: color of v, None if v is not assigned yet */
pub type Coloring = Vec<Option<ColorId>>;

/** colors of the original demonstrator, tried in this order */
pub const DEFAULT_COLORS: [&str; 3] = ["#FF5733", "#4CAF50", "#42A5F5"];

/** models a graph coloring instance */
pub trait ColoringInstance: Debug {
    /// number of vertices
    fn nb_vertices(&self) -> usize;

    /// vertices, in evaluation order
    fn vertices(&self) -> Range<VertexId> { 0..self.nb_vertices() }

    /// identifier of vertex u (as given in the graph description)
    fn name(&self, u:VertexId) -> &str;

    /// human readable label of vertex u (defaults to its identifier)
    fn label(&self, u:VertexId) -> &str { self.name(u) }

    /// vertex identified by name, if any
    fn vertex_by_name(&self, name:&str) -> Option<VertexId>;

    /// vertices adjacent to u
    fn neighbors(&self, u:VertexId) -> &[VertexId];

    /// degree of u
    fn degree(&self, u:VertexId) -> usize { self.neighbors(u).len() }

    /// true iff u and v are adjacent (symmetric)
    fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool;

    /// each edge once, as (u,v) with u < v
    fn edges(&self) -> &[(VertexId, VertexId)];

    /// directed arcs scanned by the arc consistency, both directions of each edge
    fn arcs(&self) -> &[(VertexId, VertexId)];

    /// prints a few statistics about the instance
    fn display_statistics(&self);
}


/** ordered set of color tokens. The order is the order in which colors are tried. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    tokens: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self { tokens: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect() }
    }
}

impl Palette {
    /** builds a palette, rejecting empty palettes and duplicate tokens */
    pub fn new<S: Into<String>>(tokens: impl IntoIterator<Item=S>) -> Result<Self, GraphError> {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(GraphError::EmptyPalette);
        }
        for (i,token) in tokens.iter().enumerate() {
            if tokens[..i].contains(token) {
                return Err(GraphError::DuplicateColor(token.clone()));
            }
        }
        Ok(Self { tokens })
    }

    /** first k default colors. Colors beyond the default ones are named "color-i". */
    pub fn with_nb_colors(k:usize) -> Result<Self, GraphError> {
        Self::new((0..k).map(|i| match DEFAULT_COLORS.get(i) {
            Some(c) => c.to_string(),
            None => format!("color-{}", i),
        }))
    }

    /// parses a comma separated list of tokens
    pub fn parse(s:&str) -> Result<Self, GraphError> {
        Self::new(s.split(',').map(str::trim).filter(|t| !t.is_empty()))
    }

    /// number of colors
    pub fn len(&self) -> usize { self.tokens.len() }

    /// never true (an empty palette is rejected at construction)
    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    /// token of color c
    pub fn token(&self, c:ColorId) -> &str { &self.tokens[c] }

    /// color id of a token
    pub fn color_of(&self, token:&str) -> Option<ColorId> {
        self.tokens.iter().position(|t| t == token)
    }

    /// color ids in trial order
    pub fn colors(&self) -> Range<ColorId> { 0..self.len() }
}


/**
returns true iff no pair of adjacent vertices, both assigned, share a color.
Unassigned vertices impose no constraint.
*/
pub fn is_valid(inst:&dyn ColoringInstance, coloring:&[Option<ColorId>]) -> bool {
    inst.edges().iter().all(|(u,v)| {
        match (coloring[*u], coloring[*v]) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    })
}

/** result of the checker */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerResult {
    /// valid complete coloring using n distinct colors
    Ok(usize),
    /// the vertex has no color
    VertexNotColored(VertexId),
    /// both endpoints of the edge share a color
    ConflictingEdge(VertexId, VertexId),
}

/**
checks that a coloring is complete and valid.
returns the number of distinct colors used if it is.
*/
pub fn checker(inst:&dyn ColoringInstance, coloring:&[Option<ColorId>]) -> CheckerResult {
    let mut used = BitSet::new();
    for v in inst.vertices() {
        match coloring.get(v).copied().flatten() {
            None => return CheckerResult::VertexNotColored(v),
            Some(c) => { used.insert(c); }
        }
    }
    for (u,v) in inst.edges() {
        if coloring[*u] == coloring[*v] {
            return CheckerResult::ConflictingEdge(*u, *v);
        }
    }
    CheckerResult::Ok(used.len())
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::compact_instance::CompactInstance;
    use crate::dataset::GraphDescription;

    fn triangle() -> CompactInstance {
        CompactInstance::new(&GraphDescription::from_edges(
            &["A", "B", "C"], &[("A","B"), ("B","C"), ("A","C")]
        )).unwrap()
    }

    #[test]
    fn test_palette_rejects_duplicates() {
        assert!(matches!(Palette::new(vec!["red", "green", "red"]), Err(GraphError::DuplicateColor(c)) if c == "red"));
        assert!(matches!(Palette::new(Vec::<String>::new()), Err(GraphError::EmptyPalette)));
        assert!(matches!(Palette::with_nb_colors(0), Err(GraphError::EmptyPalette)));
    }

    #[test]
    fn test_palette_order() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.token(0), "#FF5733");
        assert_eq!(palette.color_of("#42A5F5"), Some(2));
        let palette = Palette::parse("red, green,blue").unwrap();
        assert_eq!(palette.token(1), "green");
        let palette = Palette::with_nb_colors(5).unwrap();
        assert_eq!(palette.token(1), "#4CAF50");
        assert_eq!(palette.token(4), "color-4");
    }

    #[test]
    fn test_validity_ignores_unassigned() {
        let inst = triangle();
        assert!(is_valid(&inst, &[None, None, None]));
        assert!(is_valid(&inst, &[Some(0), None, Some(1)]));
        assert!(!is_valid(&inst, &[Some(0), None, Some(0)]));
        assert!(!is_valid(&inst, &[Some(1), Some(1), None]));
    }

    #[test]
    fn test_checker() {
        let inst = triangle();
        assert_eq!(checker(&inst, &[Some(0), Some(1), Some(2)]), CheckerResult::Ok(3));
        assert_eq!(checker(&inst, &[Some(0), None, Some(2)]), CheckerResult::VertexNotColored(1));
        assert_eq!(checker(&inst, &[Some(0), Some(1), Some(0)]), CheckerResult::ConflictingEdge(0, 2));
    }
}
