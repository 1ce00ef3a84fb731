use crate::error::ImportError;
use crate::graph::{ConnectionRules, GraphDocument, GraphSnapshot};
use serde_json::Value;

/// Raw import payload: JSON text or an already parsed value.
#[derive(Debug, Clone)]
pub enum ImportInput {
    Text(String),
    Json(Value),
}

impl From<&str> for ImportInput {
    fn from(text: &str) -> Self {
        ImportInput::Text(text.to_string())
    }
}

impl From<String> for ImportInput {
    fn from(text: String) -> Self {
        ImportInput::Text(text)
    }
}

impl From<Value> for ImportInput {
    fn from(value: Value) -> Self {
        ImportInput::Json(value)
    }
}

/// Parses a persisted graph into a fresh document.
///
/// Accepts either a bare visual document (`{"nodes": [...], "edges": [...]}`)
/// or a full export bundle, in which case its `graph` member is used.
pub fn import_graph(
    input: impl Into<ImportInput>,
    rules: ConnectionRules,
) -> Result<GraphDocument, ImportError> {
    let value = match input.into() {
        ImportInput::Text(text) => {
            serde_json::from_str(&text).map_err(|e| ImportError::Parse(e.to_string()))?
        }
        ImportInput::Json(value) => value,
    };

    let graph = extract_graph(value)?;
    let snapshot: GraphSnapshot =
        serde_json::from_value(graph).map_err(|e| ImportError::Shape(e.to_string()))?;
    let document = GraphDocument::from_snapshot(snapshot, rules)?;

    log::info!(
        "Imported graph with {} node(s) and {} edge(s)",
        document.len(),
        document.edge_count()
    );
    Ok(document)
}

fn extract_graph(value: Value) -> Result<Value, ImportError> {
    let Value::Object(mut object) = value else {
        return Err(ImportError::Shape("expected a JSON object".to_string()));
    };

    if object.contains_key("nodes") {
        return Ok(Value::Object(object));
    }
    match object.remove("graph") {
        Some(graph @ Value::Object(_)) => extract_graph(graph),
        _ => Err(ImportError::Shape(
            "missing 'nodes' or 'graph' member".to_string(),
        )),
    }
}
