//! Connection legality.
//!
//! The evaluator only looks at port groups and the existing edge set. It knows
//! nothing about node types, so it runs on every drag gesture before an edge
//! is materialized.

use super::edge::{Edge, ProposedEdge};
use thiserror::Error;

/// Why a proposed edge was turned down. Rejections are never shown to the
/// user; they exist for debug logging.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("one of the ports could not be resolved")]
    UnresolvedPort,
    #[error("source port is an input")]
    SourceIsInput,
    #[error("target port is not an input")]
    TargetNotInput,
    #[error("an identical edge already exists")]
    Duplicate,
    #[error("node cannot connect to itself")]
    SelfLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionRules {
    /// Whether a node's output may feed its own input.
    pub allow_self_loops: bool,
}

impl Default for ConnectionRules {
    fn default() -> Self {
        Self {
            allow_self_loops: true,
        }
    }
}

impl ConnectionRules {
    pub fn check(&self, proposed: &ProposedEdge, existing: &[Edge]) -> Result<(), Rejection> {
        let (Some(source), Some(target)) = (&proposed.source, &proposed.target) else {
            return Err(Rejection::UnresolvedPort);
        };

        if source.group.is_input() {
            return Err(Rejection::SourceIsInput);
        }
        if !target.group.is_input() {
            return Err(Rejection::TargetNotInput);
        }
        if existing
            .iter()
            .any(|e| e.joins(&source.endpoint, &target.endpoint))
        {
            return Err(Rejection::Duplicate);
        }
        if !self.allow_self_loops && source.endpoint.cell == target.endpoint.cell {
            return Err(Rejection::SelfLoop);
        }
        Ok(())
    }

    pub fn allows(&self, proposed: &ProposedEdge, existing: &[Edge]) -> bool {
        self.check(proposed, existing).is_ok()
    }
}

/// Decides whether `proposed` may become an edge under the default rules.
pub fn is_connection_allowed(proposed: &ProposedEdge, existing: &[Edge]) -> bool {
    ConnectionRules::default().allows(proposed, existing)
}
