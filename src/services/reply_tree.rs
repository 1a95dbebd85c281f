//! Nested reply threads.
//!
//! A post's replies are stored flat, each pointing at an optional parent
//! reply. [`build_tree`] turns the flat, creation-ordered list into the
//! nested forest returned to clients.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Something that can be placed in a reply tree.
pub trait TreeItem {
    type Id: Eq + Hash + Clone;

    fn item_id(&self) -> &Self::Id;
    fn parent_id(&self) -> Option<&Self::Id>;
}

/// What to do with a reply whose parent is not part of the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrphanPolicy {
    /// Leave the orphan and everything under it out of the tree.
    #[default]
    Drop,
    /// Show the orphan as a top-level reply.
    #[serde(rename = "promote")]
    #[strum(serialize = "promote")]
    PromoteToRoot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyNode<T> {
    #[serde(flatten)]
    pub reply: T,
    pub children: Vec<ReplyNode<T>>,
}

impl<T> ReplyNode<T> {
    /// Number of replies in this subtree, the node itself included.
    pub fn size(&self) -> usize {
        1 + count_nodes(&self.children)
    }
}

pub fn count_nodes<T>(forest: &[ReplyNode<T>]) -> usize {
    forest.iter().map(ReplyNode::size).sum()
}

/// Builds the forest hanging under `root_parent` (`None` for the top level).
///
/// Children keep the relative order they have in `items`. Runs in one
/// grouping pass plus one linking pass; every item is linked at most once,
/// so malformed input with parent cycles still terminates (the cycle is
/// simply unreachable from the top level).
pub fn build_tree<T: TreeItem>(
    items: Vec<T>,
    root_parent: Option<&T::Id>,
    orphans: OrphanPolicy,
) -> Vec<ReplyNode<T>> {
    let known: HashSet<T::Id> = items.iter().map(|i| i.item_id().clone()).collect();

    let mut by_parent: HashMap<Option<T::Id>, Vec<usize>> = HashMap::new();
    for (pos, item) in items.iter().enumerate() {
        let parent = match item.parent_id() {
            Some(p) if orphans == OrphanPolicy::PromoteToRoot && !known.contains(p) => None,
            p => p.cloned(),
        };
        by_parent.entry(parent).or_default().push(pos);
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    link(&root_parent.cloned(), &mut by_parent, &mut slots)
}

fn link<T: TreeItem>(
    parent: &Option<T::Id>,
    by_parent: &mut HashMap<Option<T::Id>, Vec<usize>>,
    slots: &mut [Option<T>],
) -> Vec<ReplyNode<T>> {
    let Some(positions) = by_parent.remove(parent) else {
        return vec![];
    };

    let mut nodes = Vec::with_capacity(positions.len());
    for pos in positions {
        if let Some(reply) = slots[pos].take() {
            let children = link(&Some(reply.item_id().clone()), by_parent, slots);
            nodes.push(ReplyNode { reply, children });
        }
    }
    nodes
}

/// Ids of the items whose declared parent is missing from `items`.
pub fn find_orphans<T: TreeItem>(items: &[T]) -> Vec<&T::Id> {
    let known: HashSet<&T::Id> = items.iter().map(T::item_id).collect();
    items
        .iter()
        .filter(|i| i.parent_id().is_some_and(|p| !known.contains(&p)))
        .map(T::item_id)
        .collect()
}
