use bit_set::BitSet;

use crate::color::{ColorId, VertexId};

/**
candidate colors of each vertex.
A branch works on its own copy (`clone`), so that a failed branch leaves the domains of its
parent untouched.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    /// domains[v]: colors still possible for v
    domains: Vec<BitSet>,
}

impl Domains {
    /** every vertex can take every color */
    pub fn full(nb_vertices:usize, nb_colors:usize) -> Self {
        let mut all_colors = BitSet::with_capacity(nb_colors);
        for c in 0..nb_colors { all_colors.insert(c); }
        Self { domains: vec![all_colors ; nb_vertices] }
    }

    /// colors still possible for v
    pub fn get(&self, v:VertexId) -> &BitSet { &self.domains[v] }

    /// number of colors still possible for v
    pub fn size(&self, v:VertexId) -> usize { self.domains[v].len() }

    /// true iff v has no possible color left
    pub fn is_wiped_out(&self, v:VertexId) -> bool { self.domains[v].is_empty() }

    /// true iff c is still possible for v
    pub fn contains(&self, v:VertexId, c:ColorId) -> bool { self.domains[v].contains(c) }

    /// the remaining color of v, if exactly one remains
    pub fn single_value(&self, v:VertexId) -> Option<ColorId> {
        let mut it = self.domains[v].iter();
        match (it.next(), it.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// reduces the domain of v to {c}
    pub fn assign(&mut self, v:VertexId, c:ColorId) {
        let domain = &mut self.domains[v];
        domain.clear();
        domain.insert(c);
    }

    /// removes c from the domain of v. returns true if it was there
    pub fn remove(&mut self, v:VertexId, c:ColorId) -> bool { self.domains[v].remove(c) }

    /// colors still possible for v, in palette order
    pub fn values(&self, v:VertexId) -> impl Iterator<Item=ColorId> + '_ { self.domains[v].iter() }
}
