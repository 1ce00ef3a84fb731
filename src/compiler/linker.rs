use crate::graph::{GraphDocument, PortGroup};
use ahash::AHashSet;
use itertools::Itertools;
use std::collections::HashMap;

/// Resolves successor links and entry candidates from a document's edges.
pub(super) struct Linker<'a> {
    document: &'a GraphDocument,
    /// `source node -> [(source port group, target node)]`, in edge order.
    outgoing: HashMap<&'a str, Vec<(PortGroup, &'a str)>>,
}

impl<'a> Linker<'a> {
    pub(super) fn new(document: &'a GraphDocument) -> Self {
        let outgoing = document
            .edges()
            .iter()
            .filter_map(|edge| {
                document
                    .port_group(&edge.source.cell, &edge.source.port)
                    .map(|group| (edge.source.cell.as_str(), (group, edge.target.cell.as_str())))
            })
            .into_group_map();

        Self { document, outgoing }
    }

    /// The first target reached from `node_id` through a port of `group`.
    pub(super) fn successor(&self, node_id: &str, group: PortGroup) -> Option<String> {
        let mut targets = self
            .outgoing
            .get(node_id)
            .into_iter()
            .flatten()
            .filter(|(g, _)| *g == group)
            .map(|(_, target)| *target);

        let first = targets.next()?;
        let ignored = targets.count();
        if ignored > 0 {
            log::debug!(
                "Node {} fans out {} extra edge(s) from '{}'; linking the first only",
                node_id,
                ignored,
                group.as_str()
            );
        }
        Some(first.to_string())
    }

    /// Nodes with no incoming edge, in document order.
    pub(super) fn entry_candidates(&self) -> Vec<&'a str> {
        let targets: AHashSet<&str> = self
            .document
            .edges()
            .iter()
            .map(|e| e.target.cell.as_str())
            .collect();

        self.document
            .nodes()
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| !targets.contains(id))
            .collect()
    }
}
