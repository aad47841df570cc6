// SPDX-License-Identifier: PMPL-1.0-or-later
//
// MnemoDB - Node query filter
//
// A `NodeFilter` is a conjunction of optional predicates evaluated against
// each entity by linear scan. The free-text `query` clause is an OR across
// name, entity type, and observations; all other supplied clauses must hold
// as well (AND across predicate categories).

use serde::{Deserialize, Serialize};

use crate::Entity;

/// Conjunction of optional predicates for `search_nodes`.
///
/// An empty filter matches every entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeFilter {
    /// Case-insensitive substring matched against the entity name, OR its
    /// type, OR any of its observation strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Matches when the entity's tag set intersects this set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Exact match on the entity's `source` provenance field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Exact match on the entity's `user_id` provenance field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl NodeFilter {
    /// A filter with only the free-text clause set.
    pub fn query(text: impl Into<String>) -> Self {
        Self {
            query: Some(text.into()),
            ..Self::default()
        }
    }

    /// True if every supplied predicate holds for `entity`.
    pub fn matches(&self, entity: &Entity) -> bool {
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let text_hit = entity.name.to_lowercase().contains(&needle)
                || entity.entity_type.to_lowercase().contains(&needle)
                || entity
                    .observations
                    .iter()
                    .any(|o| o.to_lowercase().contains(&needle));
            if !text_hit {
                return false;
            }
        }

        if let Some(tags) = &self.tags {
            if !entity.has_any_tag(tags) {
                return false;
            }
        }

        if let Some(source) = &self.source {
            if entity.source.as_deref() != Some(source.as_str()) {
                return false;
            }
        }

        if let Some(user_id) = &self.user_id {
            if entity.user_id.as_deref() != Some(user_id.as_str()) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Entity {
        let mut entity = Entity::new("Alice", "Person");
        entity.observations = vec!["Drinks tea".to_string(), "Lives in Oslo".to_string()];
        entity.source = Some("import".to_string());
        entity.user_id = Some("u1".to_string());
        entity.tags = Some(vec!["vip".to_string()]);
        entity
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(NodeFilter::default().matches(&alice()));
        assert!(NodeFilter::default().matches(&Entity::new("x", "y")));
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        assert!(NodeFilter::query("ALIC").matches(&alice()));
        assert!(NodeFilter::query("person").matches(&alice()));
        assert!(NodeFilter::query("oslo").matches(&alice()));
        assert!(!NodeFilter::query("bergen").matches(&alice()));
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let filter = NodeFilter {
            query: Some("tea".to_string()),
            source: Some("import".to_string()),
            ..NodeFilter::default()
        };
        assert!(filter.matches(&alice()));

        let mismatched = NodeFilter {
            query: Some("tea".to_string()),
            source: Some("manual".to_string()),
            ..NodeFilter::default()
        };
        assert!(!mismatched.matches(&alice()));
    }

    #[test]
    fn test_tag_intersection() {
        let filter = NodeFilter {
            tags: Some(vec!["staff".to_string(), "vip".to_string()]),
            ..NodeFilter::default()
        };
        assert!(filter.matches(&alice()));

        let untagged = Entity::new("Bob", "Person");
        assert!(!filter.matches(&untagged));
    }

    #[test]
    fn test_user_id_exact_match() {
        let filter = NodeFilter {
            user_id: Some("u1".to_string()),
            ..NodeFilter::default()
        };
        assert!(filter.matches(&alice()));

        let other = NodeFilter {
            user_id: Some("u2".to_string()),
            ..NodeFilter::default()
        };
        assert!(!other.matches(&alice()));
    }
}
