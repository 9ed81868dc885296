use std::collections::HashMap;

use bit_set::BitSet;
use log::{info, warn};

use crate::color::{ColoringInstance, VertexId};
use crate::dataset::GraphDescription;
use crate::dimacs;
use crate::error::GraphError;

/** input formats accepted by `CompactInstance::from_file` */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceFormat {
    /// JSON graph description (nodes with an evaluation order, edges)
    Json,
    /// DIMACS `.col` file
    Dimacs,
}

/** models a Graph Coloring instance. Immutable once built. */
#[derive(Debug)]
pub struct CompactInstance {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// names[i]: identifier of the ith vertex in evaluation order
    names: Vec<String>,
    /// labels[i]: displayed name of vertex i
    labels: Vec<String>,
    /// vertex index of each identifier
    index: HashMap<String, VertexId>,
    /// edges of the graph (u < v)
    edges: Vec<(VertexId,VertexId)>,
    /// directed arcs, in input order, both directions of each edge
    arcs: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
}

impl ColoringInstance for CompactInstance {
    fn nb_vertices(&self) -> usize { self.n }

    fn name(&self, u:VertexId) -> &str { &self.names[u] }

    fn label(&self, u:VertexId) -> &str { &self.labels[u] }

    fn vertex_by_name(&self, name:&str) -> Option<VertexId> { self.index.get(name).copied() }

    fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool { self.adj_matrix[u].contains(v) }

    fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }

    fn arcs(&self) -> &[(VertexId, VertexId)] { &self.arcs }

    fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        let degrees:Vec<usize> = self.vertices().map(|i|{ self.degree(i) }).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            println!("\t{} \t min degree", min);
            println!("\t{} \t max degree", max);
        }
    }
}


impl CompactInstance {

    /// returns the number of edges in the graph
    pub fn nb_edges(&self) -> usize { self.m }

    /** builds the instance from a graph description.
    Vertices are sorted by evaluation order (ties keep the input order),
    adjacency is made symmetric whatever the direction of the edges.
    */
    pub fn new(description:&GraphDescription) -> Result<Self, GraphError> {
        let mut nodes:Vec<_> = description.nodes.iter().collect();
        nodes.sort_by_key(|node| node.evaluation_order);
        let n = nodes.len();
        let mut index = HashMap::with_capacity(n);
        for (i,node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateVertex(node.id.clone()));
            }
        }
        let names:Vec<String> = nodes.iter().map(|node| node.id.clone()).collect();
        let labels:Vec<String> = nodes.iter()
            .map(|node| node.label.clone().unwrap_or_else(|| node.id.clone()))
            .collect();
        let mut adj_list = vec![Vec::new() ; n];
        let mut adj_matrix = vec![BitSet::with_capacity(n) ; n];
        let mut arcs = Vec::with_capacity(2*description.edges.len());
        for edge in &description.edges {
            let lookup = |id:&String| index.get(id).copied().ok_or_else(|| GraphError::UnknownVertex {
                from: edge.source.clone(),
                to: edge.target.clone(),
                unknown: id.clone(),
            });
            let source = lookup(&edge.source)?;
            let target = lookup(&edge.target)?;
            if source == target {
                return Err(GraphError::SelfLoop(edge.source.clone()));
            }
            if adj_matrix[source].contains(target) {
                warn!("edge {} -> {} declared twice, ignored", edge.source, edge.target);
                continue;
            }
            adj_matrix[source].insert(target);
            adj_matrix[target].insert(source);
            adj_list[source].push(target);
            adj_list[target].push(source);
            arcs.push((source, target));
            arcs.push((target, source));
        }
        let edges = Self::build_edges(&adj_list);
        let m = edges.len();
        info!("instance built: {} vertices, {} edges", n, m);
        Ok(Self { n, m, names, labels, index, edges, arcs, adj_list, adj_matrix })
    }

    /// reads an instance from a file
    pub fn from_file(filename:&str, format:InstanceFormat) -> Result<Self, GraphError> {
        let description = match format {
            InstanceFormat::Json => GraphDescription::from_json_file(filename)?,
            InstanceFormat::Dimacs => dimacs::read_from_file(filename)?,
        };
        Self::new(&description)
    }

    /// the map of Australia
    pub fn australia() -> Self {
        match Self::new(&GraphDescription::australia()) {
            Ok(inst) => inst,
            Err(e) => unreachable!("the Australia map is well-formed ({})", e),
        }
    }

    /// builds the edge list
    fn build_edges(adj_list:&[Vec<VertexId>]) -> Vec<(VertexId,VertexId)> {
        let mut res = Vec::new();
        for (i,l) in adj_list.iter().enumerate() {
            for j in l {
                if i < *j {
                    res.push((i,*j));
                }
            }
        }
        res
    }
}
