//! Structural assertion helpers for tree tests.

use std::sync::Arc;

use astpath::{AstItem, AstPath, TextSize, TreeItem};

/// Assert `end_offset == offset + length` everywhere and that every child of
/// a strict item lies inside its parent.
pub fn assert_tree_invariants(item: &AstItem) {
    assert_eq!(
        item.end_offset(),
        item.offset() + item.length(),
        "end offset mismatch at {item}"
    );
    if let Some(last) = item.children().last() {
        assert_eq!(
            item.length(),
            last.end_offset() - item.offset(),
            "length of {item} is not derived from its last child"
        );
    }
    for child in item.children() {
        assert!(
            child.offset() >= item.offset() && child.end_offset() <= item.end_offset(),
            "child {child} escapes parent {item}"
        );
        assert_tree_invariants(child);
    }
}

/// Assert `path` starts at `root`, covers `offset`, and descends child by child.
pub fn assert_path_valid(root: &Arc<AstItem>, path: &AstPath, offset: TextSize) {
    assert!(Arc::ptr_eq(path.root(), root), "path {path} does not start at root");
    assert!(
        path.root().offset() <= offset && offset <= path.root().end_offset(),
        "root of {path} does not cover {offset:?}"
    );
    for pair in path.as_slice().windows(2) {
        let (parent, child) = (&pair[0], &pair[1]);
        assert!(
            parent.children().iter().any(|c| Arc::ptr_eq(c, child)),
            "{child} is not a child of {parent}"
        );
        assert!(
            child.range().contains(offset),
            "{child} on path does not contain {offset:?}"
        );
    }
}

/// Leaf of a located path as `(offset, length)`.
pub fn leaf_span(path: &AstPath) -> (TextSize, TextSize) {
    (path.leaf().offset(), path.leaf().length())
}

/// Reference lookup: the first child containing `offset`, by plain scan.
pub fn scan_child(item: &AstItem, offset: TextSize) -> Option<&Arc<AstItem>> {
    item.children().iter().find(|child| {
        child.offset() <= offset && offset < child.end_offset()
    })
}

/// Reference path resolution over strict items by repeated plain scans.
pub fn scan_leaf(root: &Arc<AstItem>, offset: TextSize) -> Option<(TextSize, TextSize)> {
    if offset < root.offset() || offset > root.end_offset() {
        return None;
    }
    let mut item = root;
    while let Some(child) = scan_child(item, offset) {
        item = child;
    }
    Some((item.offset(), item.length()))
}
