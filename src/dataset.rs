/*
Implements:
 - the JSON graph description (nodes with an evaluation order, directed edges)
 - the Australia map used by the demonstrator
*/
use std::fs;

use serde::{Serialize, Deserialize};

use crate::error::GraphError;

/** a node of the graph description */
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    /// identifier referenced by the edges
    pub id: String,
    /// displayed name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// position of the vertex in the search (lowest first)
    pub evaluation_order: i64,
}

/** an edge of the graph description. Its direction does not matter. */
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescription {
    /// optional edge identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// first endpoint
    pub source: String,
    /// second endpoint
    pub target: String,
    /// optional displayed name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/** graph as provided to the solver (read once, never modified) */
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    /// nodes, in any order
    pub nodes: Vec<NodeDescription>,
    /// edges between node identifiers
    pub edges: Vec<EdgeDescription>,
}

/// (id, label) of the Australian regions, in evaluation order
const AUSTRALIA_REGIONS: [(&str, &str); 7] = [
    ("WA", "Western Australia"),
    ("NT", "Northern Territory"),
    ("SA", "South Australia"),
    ("Q", "Queensland"),
    ("NSW", "New South Wales"),
    ("V", "Victoria"),
    ("T", "Tasmania"),
];

/// borders between the Australian regions (Tasmania has none)
const AUSTRALIA_BORDERS: [(&str, &str); 9] = [
    ("WA", "NT"),
    ("WA", "SA"),
    ("NT", "SA"),
    ("NT", "Q"),
    ("SA", "Q"),
    ("SA", "NSW"),
    ("SA", "V"),
    ("Q", "NSW"),
    ("NSW", "V"),
];

impl GraphDescription {
    /** reads a graph description from a JSON string */
    pub fn from_json_str(s:&str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(s)?)
    }

    /** reads a graph description from a JSON file */
    pub fn from_json_file(filename:&str) -> Result<Self, GraphError> {
        let s = fs::read_to_string(filename).map_err(|source| GraphError::Io {
            filename: filename.to_string(),
            source,
        })?;
        Self::from_json_str(&s)
    }

    /** builds a description from node ids (in evaluation order) and edges */
    pub fn from_edges(ids:&[&str], edges:&[(&str, &str)]) -> Self {
        let nodes = ids.iter().enumerate().map(|(i,id)| NodeDescription {
            id: id.to_string(),
            label: None,
            evaluation_order: i as i64,
        }).collect();
        let edges = edges.iter().enumerate().map(|(i,(source,target))| EdgeDescription {
            id: Some(format!("{}", i)),
            source: source.to_string(),
            target: target.to_string(),
            label: None,
        }).collect();
        Self { nodes, edges }
    }

    /** the map of Australia (7 regions, 9 borders) */
    pub fn australia() -> Self {
        let ids:Vec<&str> = AUSTRALIA_REGIONS.iter().map(|(id,_)| *id).collect();
        let mut res = Self::from_edges(&ids, &AUSTRALIA_BORDERS);
        for (node, (_,label)) in res.nodes.iter_mut().zip(AUSTRALIA_REGIONS.iter()) {
            node.label = Some(label.to_string());
            node.evaluation_order += 1;
        }
        for edge in res.edges.iter_mut() {
            edge.id = Some(format!("{}-{}", edge.source, edge.target));
        }
        res
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_australia_file() {
        let description = GraphDescription::from_json_file("insts/australia.json").unwrap();
        assert_eq!(description.nodes.len(), 7);
        assert_eq!(description.edges.len(), 9);
        assert_eq!(description, GraphDescription::australia());
    }

    #[test]
    fn test_optional_fields() {
        let description = GraphDescription::from_json_str(r#"{
            "nodes": [{"id": "a", "evaluationOrder": 2}, {"id": "b", "label": "B", "evaluationOrder": 1}],
            "edges": [{"source": "a", "target": "b"}]
        }"#).unwrap();
        assert_eq!(description.nodes[0].label, None);
        assert_eq!(description.nodes[1].label.as_deref(), Some("B"));
        assert_eq!(description.edges[0].id, None);
    }

    #[test]
    fn test_missing_evaluation_order() {
        let res = GraphDescription::from_json_str(r#"{"nodes": [{"id": "a"}], "edges": []}"#);
        assert!(matches!(res, Err(GraphError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let res = GraphDescription::from_json_file("insts/does-not-exist.json");
        assert!(matches!(res, Err(GraphError::Io { .. })));
    }
}
