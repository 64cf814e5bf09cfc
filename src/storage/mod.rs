//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty, Map, Value};

use crate::config::Config;
use crate::graph::GraphViews;
use crate::roles::{Classification, Role};

/// Save classification results to the specified directory
pub fn save_results(
    classification: &Classification,
    views: &GraphViews,
    config: &Config,
    output_dir: &Path,
) -> Result<()> {
    log::info!(
        "Saving {} role assignments to {}",
        classification.assignment.len(),
        output_dir.display()
    );

    fs::create_dir_all(output_dir)?;

    save_roles(classification, output_dir)?;
    save_summary(classification, views, config, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save the role of every classified node, with its composite score
fn save_roles(classification: &Classification, output_dir: &Path) -> Result<()> {
    let path = output_dir.join("roles.json");
    let mut file = File::create(path)?;

    let mut roles = Map::new();
    for (node, role) in classification.assignment.iter() {
        roles.insert(
            node.to_string(),
            json!({
                "role": role.name(),
                "code": role.code(),
                "score": classification.scores.get(node),
            }),
        );
    }

    file.write_all(to_string_pretty(&Value::Object(roles))?.as_bytes())?;

    Ok(())
}

/// Save graph and role counts together with the configuration used
fn save_summary(
    classification: &Classification,
    views: &GraphViews,
    config: &Config,
    output_dir: &Path,
) -> Result<()> {
    let path = output_dir.join("summary.json");
    let mut file = File::create(path)?;

    let (directed_edges, undirected_edges) = views.edge_count();

    let mut role_counts = Map::new();
    let mut candidate_counts = Map::new();
    for role in Role::ALL {
        role_counts.insert(
            role.name().to_string(),
            json!(classification.assignment.count(role)),
        );
        candidate_counts.insert(
            role.name().to_string(),
            json!(classification.candidates.get(role).len()),
        );
    }

    let summary = json!({
        "graph_stats": {
            "node_count": views.node_count(),
            "directed_edge_count": directed_edges,
            "undirected_edge_count": undirected_edges,
        },
        "role_stats": {
            "classified_nodes": classification.assignment.len(),
            "unclassified_nodes": views.node_count().saturating_sub(classification.assignment.len()),
            "roles": role_counts,
            "candidates": candidate_counts,
        },
        "config": config,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}
