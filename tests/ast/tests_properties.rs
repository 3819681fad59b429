use std::sync::Arc;

use astpath::{AstItem, TreeItem};
use rstest::rstest;

use crate::helpers::tree_assertions::{assert_path_valid, assert_tree_invariants, scan_leaf};
use crate::helpers::tree_fixtures::{assignment, at, block, expr_x_plus_y, node, spaced_tokens};

fn trees() -> Vec<(&'static str, Arc<AstItem>)> {
    vec![
        ("expr", AstItem::from(expr_x_plus_y()).freeze()),
        ("assignment", AstItem::from(assignment("total", "42", 7)).freeze()),
        ("small block", AstItem::from(block(4)).freeze()),
        ("large block", AstItem::from(block(25)).freeze()),
        (
            "list",
            AstItem::from(node("list", spaced_tokens(50, 2, 1), 0)).freeze(),
        ),
    ]
}

#[test]
fn test_structural_invariants_hold() {
    for (name, root) in trees() {
        assert_tree_invariants(&root);
        assert!(root.is_locked(), "{name} is not locked after freeze");
    }
}

#[test]
fn test_every_offset_in_range_has_valid_path() {
    for (name, root) in trees() {
        for offset in u32::from(root.offset())..=u32::from(root.end_offset()) {
            let offset = at(offset);
            let path = root
                .find_path(offset)
                .unwrap_or_else(|| panic!("{name}: no path at {offset:?}"));
            assert_path_valid(&root, &path, offset);
        }
    }
}

#[test]
fn test_offsets_outside_root_have_no_path() {
    for (_, root) in trees() {
        if root.offset() > at(0) {
            assert!(root.find_path(root.offset() - at(1)).is_none());
        }
        assert!(root.find_path(root.end_offset() + at(1)).is_none());
    }
}

#[rstest]
#[case(1)]
#[case(9)]
#[case(10)]
#[case(11)]
#[case(100)]
fn test_search_strategy_does_not_change_result(#[case] count: usize) {
    let root = AstItem::from(node("list", spaced_tokens(count, 3, 2), 0)).freeze();
    for offset in 0..=u32::from(root.end_offset()) {
        let offset = at(offset);
        let found = root.find_path(offset).map(|path| {
            let leaf = path.leaf();
            (leaf.offset(), leaf.length())
        });
        assert_eq!(found, scan_leaf(&root, offset), "{count} tokens at {offset:?}");
    }
}

#[test]
fn test_leaf_is_a_token_or_has_no_containing_child() {
    for (_, root) in trees() {
        for offset in 0..=u32::from(root.end_offset()) {
            let offset = at(offset);
            let Some(path) = root.find_path(offset) else {
                continue;
            };
            let leaf = path.leaf();
            assert!(
                leaf.is_token() || leaf.children().iter().all(|c| !c.range().contains(offset)),
                "{leaf} has a child containing {offset:?}"
            );
        }
    }
}

#[test]
fn test_text_covers_every_token() {
    let root = AstItem::from(block(3)).freeze();
    assert_eq!(root.as_text(), "{v0=0; v1=1; v2=2;}");
    assert_eq!(u32::from(root.length()) as usize, root.as_text().len());
}
