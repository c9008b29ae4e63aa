//! Stable grouping of records by an extracted key.
//!
//! # Responsibility
//! - Partition a record slice into key buckets without reordering.
//!
//! # Invariants
//! - The union of all buckets equals the input exactly; nothing is
//!   dropped or duplicated.
//! - Buckets appear in first-seen key order; members keep their relative
//!   input order.
//! - A missing key lands in the caller's fallback bucket; empty input
//!   produces no buckets at all.

use std::collections::HashMap;

/// One bucket of records sharing a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a, T> {
    pub key: String,
    pub members: Vec<&'a T>,
}

/// Groups `records` by `key_of`, using `fallback` for records without a key.
pub fn group_by<'a, T, F>(records: &'a [T], fallback: &str, key_of: F) -> Vec<Group<'a, T>>
where
    F: Fn(&T) -> Option<String>,
{
    let mut groups: Vec<Group<'a, T>> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = key_of(record).unwrap_or_else(|| fallback.to_string());
        match index_by_key.get(&key) {
            Some(&index) => groups[index].members.push(record),
            None => {
                index_by_key.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    members: vec![record],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::group_by;

    struct Item {
        name: &'static str,
        location: Option<&'static str>,
    }

    fn item(name: &'static str, location: Option<&'static str>) -> Item {
        Item { name, location }
    }

    #[test]
    fn buckets_preserve_input_order_and_cover_everything() {
        let items = vec![
            item("a", Some("garage")),
            item("b", Some("kitchen")),
            item("c", Some("garage")),
            item("d", None),
        ];

        let groups = group_by(&items, "Unspecified Location", |i| {
            i.location.map(str::to_string)
        });

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].key, "garage");
        assert_eq!(
            groups[0].members.iter().map(|i| i.name).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
        assert_eq!(groups[1].key, "kitchen");
        assert_eq!(groups[2].key, "Unspecified Location");

        let total: usize = groups.iter().map(|g| g.members.len()).sum();
        assert_eq!(total, items.len());
    }

    #[test]
    fn empty_input_creates_no_buckets() {
        let items: Vec<Item> = Vec::new();
        let groups = group_by(&items, "Unspecified Location", |i| {
            i.location.map(str::to_string)
        });
        assert!(groups.is_empty());
    }
}
