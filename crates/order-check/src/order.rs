//! Orderable lab and imaging items.

use serde::{Deserialize, Serialize};

use crate::rules::Priority;

/// Rank given to catalog entries that declare none; they list last.
pub const DEFAULT_RANK: u32 = 999;

fn default_rank() -> u32 {
    DEFAULT_RANK
}

/// One entry of the order catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique display name.
    #[serde(rename = "order_name")]
    pub name: String,
    /// Relevance rank for the default listing; lower is more relevant.
    #[serde(rename = "order", default = "default_rank")]
    pub rank: u32,
    /// Why the order is suggested for this visit.
    #[serde(rename = "reason", default)]
    pub rationale: String,
    /// Display priority tag, if the catalog gives one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Order {
    /// Creates a catalog entry.
    pub fn new(name: impl Into<String>, rank: u32, rationale: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rank,
            rationale: rationale.into(),
            priority: None,
        }
    }

    /// Sets the display priority tag.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_from_fixture() {
        let order: Order = serde_json::from_str(
            r#"{"order_name": "过敏原检测", "order": 1, "reason": "鼻痒喷嚏", "priority": "高"}"#,
        )
        .unwrap();
        assert_eq!(
            order,
            Order::new("过敏原检测", 1, "鼻痒喷嚏").with_priority(Priority::High)
        );
    }

    #[test]
    fn test_order_without_rank_sorts_last() {
        let order: Order = serde_json::from_str(r#"{"order_name": "尿常规"}"#).unwrap();
        assert_eq!(order.rank, DEFAULT_RANK);
        assert_eq!(order.rationale, "");
        assert!(order.priority.is_none());
    }
}
