//! Serialization of Neo4j nodes and relationships to the JSON contract
//! consumed by downstream tooling.
//!
//! Node identity is the composite `"{Label}:{relational_id}"` string, stable
//! across syncs because the relational rowid is the MERGE key.

use std::collections::BTreeMap;

use neo4rs::Node;
use serde::Serialize;
use serde_json::Value;

/// A serialized graph node.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub group: String,
    pub properties: BTreeMap<String, Value>,
}

/// A serialized graph relationship.
#[derive(Debug, Clone, Serialize)]
pub struct GraphLink {
    pub from: String,
    pub to: String,
    pub label: String,
    pub properties: BTreeMap<String, Value>,
}

/// A node-and-link bundle, the output shape of every graph query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Compose the stable node identity from label and relational id.
pub fn node_key(label: &str, id: i64) -> String {
    format!("{label}:{id}")
}

/// Convert a bolt node into the serialized contract shape.
///
/// Property conversion never fails: values that do not decode as JSON are
/// carried as their string form, and anything else is rendered as a textual
/// marker naming the key.
pub fn serialize_node(node: &Node) -> GraphNode {
    let group = node
        .labels()
        .first()
        .map(|l| l.to_string())
        .unwrap_or_default();

    let mut properties = BTreeMap::new();
    for key in node.keys() {
        let value = node
            .get::<Value>(key)
            .or_else(|_| node.get::<String>(key).map(Value::String))
            .unwrap_or_else(|e| undecoded_text(key, &e));
        properties.insert(key.to_string(), value);
    }

    let relational_id = node.get::<i64>("id").unwrap_or_default();
    let label = display_label(&properties, &group);

    GraphNode {
        id: node_key(&group, relational_id),
        label,
        group,
        properties,
    }
}

/// Split a composite node identity back into label and relational id.
pub fn parse_node_key(key: &str) -> Option<(String, i64)> {
    let (label, id) = key.split_once(':')?;
    if label.is_empty() {
        return None;
    }
    let id = id.parse().ok()?;
    Some((label.to_string(), id))
}

/// Last-resort rendering for a property that decodes as neither JSON nor a
/// plain string: keep a marker naming the key and the decode failure rather
/// than dropping the value to null.
fn undecoded_text(key: &str, err: &dyn std::fmt::Display) -> Value {
    Value::String(format!("<{key}: {err}>"))
}

/// Display label fallback chain: name, then type, then the node's label.
fn display_label(properties: &BTreeMap<String, Value>, group: &str) -> String {
    for key in ["name", "type"] {
        if let Some(Value::String(s)) = properties.get(key) {
            if !s.is_empty() {
                return s.clone();
            }
        }
    }
    group.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_key_composition() {
        assert_eq!(node_key("Disease", 7), "Disease:7");
        assert_eq!(node_key("ProductEvent", 123), "ProductEvent:123");
    }

    #[test]
    fn test_node_key_roundtrip() {
        assert_eq!(parse_node_key("Disease:7"), Some(("Disease".to_string(), 7)));
        assert_eq!(parse_node_key("Disease"), None);
        assert_eq!(parse_node_key(":7"), None);
        assert_eq!(parse_node_key("Disease:seven"), None);
    }

    #[test]
    fn test_display_label_prefers_name() {
        let mut props = BTreeMap::new();
        props.insert("name".to_string(), json!("Sepsis"));
        props.insert("type".to_string(), json!("antagonistic"));
        assert_eq!(display_label(&props, "Disease"), "Sepsis");
    }

    #[test]
    fn test_display_label_falls_back_to_type() {
        let mut props = BTreeMap::new();
        props.insert("type".to_string(), json!("antagonistic"));
        assert_eq!(display_label(&props, "Interaction"), "antagonistic");
    }

    #[test]
    fn test_display_label_falls_back_to_group() {
        let props = BTreeMap::new();
        assert_eq!(display_label(&props, "Migration"), "Migration");

        let mut empty_name = BTreeMap::new();
        empty_name.insert("name".to_string(), json!(""));
        assert_eq!(display_label(&empty_name, "Migration"), "Migration");
    }

    #[test]
    fn test_undecodable_property_keeps_textual_form() {
        let value = undecoded_text("observed_at", &"unsupported temporal value");
        assert_eq!(value, json!("<observed_at: unsupported temporal value>"));
    }

    #[test]
    fn test_graph_view_serializes_to_contract_shape() {
        let view = GraphView {
            nodes: vec![GraphNode {
                id: "Disease:1".to_string(),
                label: "Sepsis".to_string(),
                group: "Disease".to_string(),
                properties: BTreeMap::new(),
            }],
            links: vec![GraphLink {
                from: "Species:2".to_string(),
                to: "Disease:1".to_string(),
                label: "ASSOCIATED_WITH".to_string(),
                properties: BTreeMap::new(),
            }],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["nodes"][0]["id"], "Disease:1");
        assert_eq!(json["links"][0]["label"], "ASSOCIATED_WITH");
    }
}
