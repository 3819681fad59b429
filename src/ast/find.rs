//! Offset → path resolution.
//!
//! Strict items descend into the single child containing the offset, found by
//! a linear scan or, for wide items, by binary search over child start
//! offsets. Compound nodes try every containing child and keep the path with
//! the narrowest leaf.

use std::sync::Arc;

use crate::base::TextSize;
use crate::base::constants::LINEAR_SCAN_LIMIT;

use super::{AstItem, AstPath, TreeItem};

pub(super) fn find_path(root: &Arc<AstItem>, offset: TextSize) -> Option<AstPath> {
    if !root.range().contains_inclusive(offset) {
        return None;
    }
    let mut path = Vec::new();
    descend(root, offset, &mut path);
    AstPath::create(path)
}

fn descend(mut item: &Arc<AstItem>, offset: TextSize, path: &mut Vec<Arc<AstItem>>) {
    loop {
        path.push(Arc::clone(item));
        if item.as_node().is_some_and(|node| node.is_compound()) {
            descend_compound(item, offset, path);
            return;
        }
        match child_containing(item, offset) {
            Some(child) => item = child,
            None => return,
        }
    }
}

fn child_containing(item: &AstItem, offset: TextSize) -> Option<&Arc<AstItem>> {
    let children = item.children();
    if children.len() > LINEAR_SCAN_LIMIT {
        tracing::trace!(
            children = children.len(),
            offset = u32::from(offset),
            "binary child search"
        );
        item.core().child_by_offset(offset)
    } else {
        children
            .iter()
            .find(|child| child.range().contains(offset))
    }
}

fn descend_compound(node: &AstItem, offset: TextSize, path: &mut Vec<Arc<AstItem>>) {
    let mut best: Option<Vec<Arc<AstItem>>> = None;
    for child in node.children().iter().filter(|child| child.range().contains(offset)) {
        let mut candidate = Vec::new();
        descend(child, offset, &mut candidate);
        let narrower = match &best {
            Some(best) => leaf_length(&candidate) < leaf_length(best),
            None => true,
        };
        if narrower {
            best = Some(candidate);
        }
    }
    if let Some(best) = best {
        path.extend(best);
    }
}

fn leaf_length(path: &[Arc<AstItem>]) -> TextSize {
    path.last().map(|leaf| leaf.length()).unwrap_or_default()
}
