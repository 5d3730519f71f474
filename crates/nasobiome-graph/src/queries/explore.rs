//! Graph sampling and neighborhood exploration.

use anyhow::Result;
use neo4rs::{Node, Query};

use super::serialize::{parse_node_key, serialize_node, GraphLink, GraphNode, GraphView};
use crate::GraphClient;

/// Fetch a bounded sample of the core entity nodes (diseases, species and
/// body sites) for an initial overview.
pub async fn fetch_initial_graph(client: &GraphClient, limit: i64) -> Result<Vec<GraphNode>> {
    let query = Query::new(
        "MATCH (n)
         WHERE n:Disease OR n:Species OR n:BodySite
         RETURN n
         ORDER BY n.name
         LIMIT $limit"
            .to_string(),
    )
    .param("limit", limit);

    let mut nodes = Vec::new();
    for row in client.query(query).await? {
        if let Ok(node) = row.get::<Node>("n") {
            nodes.push(serialize_node(&node));
        }
    }
    Ok(nodes)
}

/// Fetch the one-hop neighborhood of a node addressed by its composite
/// `"Label:id"` identity. Unknown or malformed ids yield an empty view.
pub async fn fetch_neighbors(client: &GraphClient, node_id: &str) -> Result<GraphView> {
    let Some((label, id)) = parse_node_key(node_id) else {
        return Ok(GraphView::default());
    };

    let mut view = GraphView::default();

    let center_query = Query::new(
        "MATCH (n {id: $id}) WHERE $label IN labels(n) RETURN n".to_string(),
    )
    .param("id", id)
    .param("label", label.as_str());

    let center_rows = client.query(center_query).await?;
    let Some(center_row) = center_rows.into_iter().next() else {
        return Ok(view);
    };
    if let Ok(node) = center_row.get::<Node>("n") {
        view.nodes.push(serialize_node(&node));
    }

    let neighbor_query = Query::new(
        "MATCH (n {id: $id})-[r]-(m)
         WHERE $label IN labels(n)
         RETURN DISTINCT m AS n"
            .to_string(),
    )
    .param("id", id)
    .param("label", label.as_str());

    for row in client.query(neighbor_query).await? {
        if let Ok(node) = row.get::<Node>("n") {
            view.nodes.push(serialize_node(&node));
        }
    }

    let link_query = Query::new(
        "MATCH (n {id: $id})-[r]-(m)
         WHERE $label IN labels(n)
         RETURN DISTINCT head(labels(startNode(r))) + ':' + toString(startNode(r).id) AS from,
                head(labels(endNode(r))) + ':' + toString(endNode(r).id) AS to,
                type(r) AS label,
                properties(r) AS props"
            .to_string(),
    )
    .param("id", id)
    .param("label", label.as_str());

    for row in client.query(link_query).await? {
        let from: String = row.get("from").unwrap_or_default();
        let to: String = row.get("to").unwrap_or_default();
        let rel_label: String = row.get("label").unwrap_or_default();
        let properties: std::collections::BTreeMap<String, serde_json::Value> =
            row.get("props").unwrap_or_default();
        if !from.is_empty() && !to.is_empty() {
            view.links.push(GraphLink {
                from,
                to,
                label: rel_label,
                properties,
            });
        }
    }

    Ok(view)
}
