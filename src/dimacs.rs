use std::fs;

use log::warn;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, not_line_ending, space0, space1};
use nom::combinator::{all_consuming, map, map_res, value};
use nom::sequence::{preceded, separated_pair, terminated, tuple};

use crate::dataset::{EdgeDescription, GraphDescription, NodeDescription};
use crate::error::GraphError;


/// a line of a DIMACS file
#[derive(Clone, Debug, PartialEq, Eq)]
enum DimacsLine {
    Comment,
    Header(usize, usize),
    Edge(usize, usize),
}

/** reads a DIMACS file into a graph description.
Vertex i (1-based) gets the identifier "i" and is evaluated i-th.
*/
pub fn read_from_file(filename:&str) -> Result<GraphDescription, GraphError> {
    let s = fs::read_to_string(filename).map_err(|source| GraphError::Io {
        filename: filename.to_string(),
        source,
    })?;
    read_from_str(&s)
}

/// reads a DIMACS string into a graph description
pub fn read_from_str(s:&str) -> Result<GraphDescription, GraphError> {
    let mut header:Option<(usize,usize)> = None;
    let mut edges = Vec::new();
    for (line_number, line) in s.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() { continue; }
        let parsed = all_consuming(read_line)(line)
            .map_err(|_| GraphError::Dimacs(format!("line {}: unable to parse \"{}\"", line_number+1, line)))?
            .1;
        match parsed {
            DimacsLine::Comment => {},
            DimacsLine::Header(n,m) => {
                if header.is_some() {
                    return Err(GraphError::Dimacs(format!("line {}: second header", line_number+1)));
                }
                header = Some((n,m));
            },
            DimacsLine::Edge(a,b) => {
                let n = match header {
                    None => return Err(GraphError::Dimacs(format!("line {}: edge before the header", line_number+1))),
                    Some((n,_)) => n,
                };
                if a == 0 || b == 0 || a > n || b > n { // WARNING: indices start at 1 in the DIMACS format
                    return Err(GraphError::Dimacs(format!("line {}: vertex out of range 1..{}", line_number+1, n)));
                }
                edges.push((a,b));
            }
        }
    }
    let (n,m) = header.ok_or_else(|| GraphError::Dimacs("missing \"p edge\" header".to_string()))?;
    if edges.len() != m && 2*edges.len() != m {
        warn!("DIMACS header announces {} edges, {} read", m, edges.len());
    }
    let nodes = (1..=n).map(|i| NodeDescription {
        id: i.to_string(),
        label: None,
        evaluation_order: i as i64,
    }).collect();
    let edges = edges.iter().map(|(a,b)| EdgeDescription {
        id: None,
        source: a.to_string(),
        target: b.to_string(),
        label: None,
    }).collect();
    Ok(GraphDescription { nodes, edges })
}

/// reads a line (comment, header or edge)
fn read_line(s:&str) -> IResult<&str, DimacsLine> {
    alt((
        value(DimacsLine::Comment, skip_comment),
        map(read_header, |(n,m)| DimacsLine::Header(n,m)),
        map(read_edge, |(a,b)| DimacsLine::Edge(a,b)),
    ))(s)
}

/// skips a single comment
fn skip_comment(s:&str) -> IResult<&str, &str> {
    preceded(tag("c"), not_line_ending)(s)
}

/// reads a non-negative integer
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(s)
}

/// reads two numbers separated by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    terminated(separated_pair(read_integer, space1, read_integer), space0)(s)
}

/// reads header containing (n,m)
fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("p"), space1, alt((tag("edge"), tag("col"))), space1)),
        read_two_integers
    )(s)
}

/// reads edge line
fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(tuple((tag("e"), space1)), read_two_integers)(s)
}
