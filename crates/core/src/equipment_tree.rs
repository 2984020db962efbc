//! Nesting of the equipment master's adjacency list into a tree.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::DbId;

/// One node of the equipment tree: the record itself plus its children.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

/// Nest a flat list into trees.
///
/// `link` returns `(id, parent_id)` for an item. Items whose parent is absent
/// from `items` (top level, or parent filtered out as deleted) become roots.
/// Items caught in a parent cycle are surfaced as roots instead of dropped.
/// Sibling order follows the input order.
pub fn build_tree<T, F>(items: Vec<T>, link: F) -> Vec<TreeNode<T>>
where
    F: Fn(&T) -> (DbId, Option<DbId>),
{
    let ids: HashSet<DbId> = items.iter().map(|item| link(item).0).collect();

    let mut roots = Vec::new();
    let mut by_parent: HashMap<DbId, Vec<T>> = HashMap::new();
    for item in items {
        match link(&item).1 {
            Some(parent) if ids.contains(&parent) => {
                by_parent.entry(parent).or_default().push(item)
            }
            _ => roots.push(item),
        }
    }

    let mut tree: Vec<TreeNode<T>> = roots
        .into_iter()
        .map(|root| attach(root, &mut by_parent, &link))
        .collect();

    loop {
        let next = by_parent.keys().next().copied();
        let Some(parent) = next else {
            break;
        };
        for item in by_parent.remove(&parent).unwrap_or_default() {
            tree.push(attach(item, &mut by_parent, &link));
        }
    }

    tree
}

fn attach<T, F>(item: T, by_parent: &mut HashMap<DbId, Vec<T>>, link: &F) -> TreeNode<T>
where
    F: Fn(&T) -> (DbId, Option<DbId>),
{
    let id = link(&item).0;
    let children = by_parent
        .remove(&id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach(child, by_parent, link))
        .collect();
    TreeNode { item, children }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Clone, Serialize)]
    struct Node {
        id: DbId,
        parent: Option<DbId>,
        name: &'static str,
    }

    fn node(name: &'static str, parent: Option<DbId>) -> Node {
        Node {
            id: Uuid::new_v4(),
            parent,
            name,
        }
    }

    fn link(n: &Node) -> (DbId, Option<DbId>) {
        (n.id, n.parent)
    }

    #[test]
    fn nests_children_under_parents() {
        let plant = node("plant", None);
        let line = node("line", Some(plant.id));
        let press = node("press", Some(line.id));
        let office = node("office", None);

        let tree = build_tree(vec![press, office, line, plant], link);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].item.name, "office");
        let plant = &tree[1];
        assert_eq!(plant.item.name, "plant");
        assert_eq!(plant.children.len(), 1);
        assert_eq!(plant.children[0].item.name, "line");
        assert_eq!(plant.children[0].children[0].item.name, "press");
    }

    #[test]
    fn missing_parent_promotes_to_root() {
        let orphan = node("orphan", Some(Uuid::new_v4()));
        let tree = build_tree(vec![orphan], link);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn cycle_members_are_not_dropped() {
        let mut a = node("a", None);
        let b = node("b", Some(a.id));
        a.parent = Some(b.id);

        let tree = build_tree(vec![a, b], link);
        let total: usize = tree.iter().map(|n| 1 + n.children.len()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn serializes_item_fields_inline() {
        let root = node("root", None);
        let json = serde_json::to_value(build_tree(vec![root], link)).unwrap();
        assert_eq!(json[0]["name"], "root");
        assert!(json[0]["children"].as_array().unwrap().is_empty());
    }
}
