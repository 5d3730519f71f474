//! Disease pathway reconstruction.
//!
//! Walks every relationship branch that can contribute to a disease and
//! assembles the induced subgraph: directly associated species, causing
//! interactions with their participants and sites, causing product events
//! with their full context, the affected site, and causing migrations with
//! their endpoints. Each branch is an independent query, so an empty branch
//! never suppresses the others.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::Result;
use neo4rs::{BoltType, Node, Query};
use tracing::debug;

use super::serialize::{serialize_node, GraphLink, GraphView};
use crate::GraphClient;

/// One query per pathway branch. Every branch anchors on the disease and
/// returns candidate nodes as `n`.
const BRANCH_QUERIES: &[&str] = &[
    // The disease itself.
    "MATCH (d:Disease {id: $id}) RETURN d AS n",
    // Directly associated species.
    "MATCH (d:Disease {id: $id})<-[:ASSOCIATED_WITH]-(s:Species) RETURN DISTINCT s AS n",
    // Interactions causing the disease, their participants and sites.
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(i:Interaction) RETURN DISTINCT i AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(i:Interaction)-[:INVOLVES]->(s:Species)
     RETURN DISTINCT s AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(i:Interaction)-[:OCCURS_AT]->(b:BodySite)
     RETURN DISTINCT b AS n",
    // Product events causing the disease and their full context.
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(e:ProductEvent) RETURN DISTINCT e AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(e:ProductEvent)-[:PRODUCT]->(p:Product)
     RETURN DISTINCT p AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(e:ProductEvent)<-[:PRODUCES_EVENT]-(s:Species)
     RETURN DISTINCT s AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(e:ProductEvent)<-[:PARTICIPATES_IN]-(s:Species)
     RETURN DISTINCT s AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(e:ProductEvent)-[:AT_SITE]->(b:BodySite)
     RETURN DISTINCT b AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(e:ProductEvent)-[:DURING_MIGRATION]->(m:Migration)
     RETURN DISTINCT m AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(e:ProductEvent)-[:DURING_INTERACTION]->(i:Interaction)
     RETURN DISTINCT i AS n",
    // The site the disease affects.
    "MATCH (d:Disease {id: $id})-[:AFFECTS]->(b:BodySite) RETURN DISTINCT b AS n",
    // Migrations causing the disease, their species and endpoints.
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(m:Migration) RETURN DISTINCT m AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(m:Migration)-[:INVOLVES_SPECIES]->(s:Species)
     RETURN DISTINCT s AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(m:Migration)-[:STARTS_FROM]->(b:BodySite)
     RETURN DISTINCT b AS n",
    "MATCH (d:Disease {id: $id})<-[:CAUSES]-(m:Migration)-[:MIGRATES_TO]->(b:BodySite)
     RETURN DISTINCT b AS n",
];

/// Fetch the complete pathway subgraph for a disease by relational id.
///
/// An unknown disease id yields an empty view.
pub async fn fetch_disease_pathway(client: &GraphClient, disease_id: i64) -> Result<GraphView> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut keys: Vec<(String, i64)> = Vec::new();
    let mut view = GraphView::default();

    for branch in BRANCH_QUERIES {
        let query = Query::new(branch.to_string()).param("id", disease_id);
        for row in client.query(query).await? {
            let Ok(node) = row.get::<Node>("n") else {
                continue;
            };
            let serialized = serialize_node(&node);
            if seen.insert(serialized.id.clone()) {
                keys.push((serialized.group.clone(), node.get::<i64>("id").unwrap_or_default()));
                view.nodes.push(serialized);
            }
        }
    }

    if view.nodes.is_empty() {
        debug!(disease_id, "No pathway nodes found");
        return Ok(view);
    }

    view.links = fetch_induced_links(client, &keys).await?;

    debug!(
        disease_id,
        nodes = view.nodes.len(),
        links = view.links.len(),
        "Pathway assembled"
    );
    Ok(view)
}

/// Fetch every relationship whose endpoints both lie in the collected node
/// set. The pairwise UNWIND confines the scan to the pathway nodes instead
/// of the whole graph.
async fn fetch_induced_links(
    client: &GraphClient,
    keys: &[(String, i64)],
) -> Result<Vec<GraphLink>> {
    let key_maps: Vec<HashMap<String, BoltType>> = keys
        .iter()
        .map(|(label, id)| {
            let mut m: HashMap<String, BoltType> = HashMap::new();
            m.insert("label".to_string(), label.clone().into());
            m.insert("id".to_string(), (*id).into());
            m
        })
        .collect();

    let query = Query::new(
        "UNWIND $keys AS k
         MATCH (n) WHERE head(labels(n)) = k.label AND n.id = k.id
         WITH collect(DISTINCT n) AS nodes
         UNWIND nodes AS a
         UNWIND nodes AS b
         WITH a, b WHERE a <> b
         MATCH (a)-[r]->(b)
         RETURN DISTINCT head(labels(a)) + ':' + toString(a.id) AS from,
                head(labels(b)) + ':' + toString(b.id) AS to,
                type(r) AS label,
                properties(r) AS props"
            .to_string(),
    )
    .param("keys", key_maps);

    let mut links = Vec::new();
    for row in client.query(query).await? {
        let from: String = row.get("from").unwrap_or_default();
        let to: String = row.get("to").unwrap_or_default();
        let label: String = row.get("label").unwrap_or_default();
        let properties: BTreeMap<String, serde_json::Value> =
            row.get("props").unwrap_or_default();
        if !from.is_empty() && !to.is_empty() {
            links.push(GraphLink {
                from,
                to,
                label,
                properties,
            });
        }
    }
    Ok(links)
}
