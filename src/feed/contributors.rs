//! Per-author rollup over the update set.

use std::collections::HashMap;

use crate::models::{Contributor, Update};

/// Rank contributors by commit count, ties kept in first-seen order.
///
/// Handles containing whitespace are treated as human display names rather
/// than platform logins and excluded from the ranking.
pub fn aggregate(updates: &[Update]) -> Vec<Contributor> {
    let mut contributors: Vec<Contributor> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for update in updates {
        if update.author_handle.contains(char::is_whitespace) {
            continue;
        }
        match index.get(&update.author_handle) {
            Some(&i) => contributors[i].commit_count += 1,
            None => {
                index.insert(update.author_handle.clone(), contributors.len());
                contributors.push(Contributor {
                    handle: update.author_handle.clone(),
                    commit_count: 1,
                });
            }
        }
    }

    // Stable sort preserves first-seen order among equal counts.
    contributors.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
    contributors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UpdateType;

    fn update(author: &str) -> Update {
        Update {
            short_hash: "abc1234".to_string(),
            timestamp_seconds: 1_700_000_000,
            author_handle: author.to_string(),
            source_tag: "web".to_string(),
            kind: UpdateType::Update,
            category: "General".to_string(),
            date_iso: "2023-11-14".to_string(),
            time_hhmm: "22:13".to_string(),
            summary: "Update".to_string(),
        }
    }

    #[test]
    fn ranks_by_count_with_first_seen_ties() {
        let updates = vec![
            update("alice"),
            update("bob"),
            update("carol"),
            update("bob"),
            update("carol"),
        ];

        let ranked = aggregate(&updates);
        assert_eq!(ranked.len(), 3);
        // bob and carol tie at 2; bob was seen first.
        assert_eq!(ranked[0].handle, "bob");
        assert_eq!(ranked[1].handle, "carol");
        assert_eq!(ranked[2].handle, "alice");
        assert_eq!(ranked[0].commit_count, 2);
    }

    #[test]
    fn excludes_display_names_with_whitespace() {
        let updates = vec![update("alice"), update("Bob Smith"), update("alice")];
        let ranked = aggregate(&updates);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].handle, "alice");
        assert_eq!(ranked[0].commit_count, 2);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let updates = vec![update("alice"), update("bob"), update("alice")];
        assert_eq!(aggregate(&updates), aggregate(&updates));
    }
}
