//! Weighted edge list loading
//!
//! One edge per row: `source<delim>target<delim>weight`. No header, `#`
//! starts a comment line, whitespace around fields is ignored. Any malformed
//! row fails the whole load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::{LoadError, Result};
use crate::graph::{GraphBuilder, GraphViews};

/// Load both graph views from an edge list file
pub fn load_edge_list(path: &Path, delimiter: u8) -> Result<GraphViews> {
    log::info!("Reading edge list: {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let views = read_edge_list(file, delimiter)?;

    let (directed_edges, undirected_edges) = views.edge_count();
    log::info!(
        "Loaded {} nodes, {} directed edges, {} undirected edges",
        views.node_count(),
        directed_edges,
        undirected_edges
    );

    Ok(views)
}

/// Read both graph views from any reader
pub fn read_edge_list<R: Read>(reader: R, delimiter: u8) -> Result<GraphViews> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut builder = GraphBuilder::with_capacity(1024);
    let mut rows = 0usize;

    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv {
            line: source.position().map_or(0, |p| p.line()),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());

        let (src, dst, weight) = parse_row(&record, line)?;
        builder.add_edge(src, dst, weight);
        rows += 1;
    }

    log::debug!("Parsed {} rows into {} nodes", rows, builder.node_count());
    builder.build()
}

fn parse_row(record: &StringRecord, line: u64) -> std::result::Result<(&str, &str, f64), LoadError> {
    if record.len() > 3 {
        return Err(LoadError::TooManyFields {
            line,
            found: record.len(),
        });
    }

    let src = node_field(record, 0, "source", line)?;
    let dst = node_field(record, 1, "target", line)?;

    let raw_weight = record
        .get(2)
        .filter(|value| !value.is_empty())
        .ok_or(LoadError::MissingField {
            line,
            field: "weight",
        })?;

    let weight = raw_weight
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
        .ok_or_else(|| LoadError::InvalidWeight {
            line,
            value: raw_weight.to_string(),
        })?;

    Ok((src, dst, weight))
}

fn node_field<'r>(
    record: &'r StringRecord,
    index: usize,
    field: &'static str,
    line: u64,
) -> std::result::Result<&'r str, LoadError> {
    match record.get(index) {
        None => Err(LoadError::MissingField { line, field }),
        Some("") => Err(LoadError::EmptyNodeId { line }),
        Some(id) => Ok(id),
    }
}
