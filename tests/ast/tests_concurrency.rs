use std::sync::Arc;
use std::thread;

use astpath::{AstItem, AstPath, TextSize, TreeItem};
use rayon::prelude::*;

use crate::helpers::tree_fixtures::{at, block};

fn leaf_of(path: Option<AstPath>) -> Option<(TextSize, TextSize)> {
    path.map(|path| (path.leaf().offset(), path.leaf().length()))
}

#[test]
fn test_parallel_queries_match_sequential() {
    let root = AstItem::from(block(60)).freeze();
    let end = u32::from(root.end_offset()) + 1;

    let sequential: Vec<_> = (0..=end).map(|o| leaf_of(root.find_path(at(o)))).collect();

    // The first parallel pass races to build the offset tables.
    let fresh = AstItem::from(block(60)).freeze();
    let parallel: Vec<_> = (0..=end)
        .into_par_iter()
        .map(|o| leaf_of(fresh.find_path(at(o))))
        .collect();
    assert_eq!(parallel, sequential);

    let again: Vec<_> = (0..=end)
        .into_par_iter()
        .map(|o| leaf_of(fresh.find_path(at(o))))
        .collect();
    assert_eq!(again, sequential);
}

#[test]
fn test_parallel_name_lookups() {
    let root = AstItem::from(block(30)).freeze();
    let identifiers: Vec<_> = (0..64)
        .into_par_iter()
        .map(|_| {
            root.as_node()
                .and_then(|block| block.get_token_type_identifier("statement.ID"))
                .map(str::to_owned)
        })
        .collect();
    assert!(identifiers.iter().all(|id| id.as_deref() == Some("v0")));
}

#[test]
fn test_paths_outlive_other_threads() {
    let root = AstItem::from(block(20)).freeze();
    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            let root = Arc::clone(&root);
            thread::spawn(move || root.find_path(at(1 + i * 6)))
        })
        .collect();

    let paths: Vec<AstPath> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().unwrap())
        .collect();
    drop(root);

    for (i, path) in paths.iter().enumerate() {
        assert_eq!(path.len(), 3);
        let statement = path[1].as_node().unwrap();
        assert_eq!(
            statement.get_token_type_identifier("ID"),
            Some(format!("v{i}").as_str())
        );
    }
}
