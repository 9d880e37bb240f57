//! Integration tests for loading tree descriptions from disk.

use std::io::Write;

use tempfile::NamedTempFile;
use treefuse_model::{load_tree, NodeId, NodePayload, Tree, TreeError};

fn write_description(json: &str) -> NamedTempFile {
    let mut file: NamedTempFile = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn child(tree: &Tree, parent: NodeId, tag: &str) -> NodeId {
    tree.children(parent)
        .find(|n| n.tag() == tag)
        .map(|n| n.id())
        .unwrap()
}

#[test]
fn test_load_tree_from_file() {
    let file: NamedTempFile = write_description(
        r#"{
            "tag": "root",
            "children": [
                {"tag": "etc", "children": [
                    {"tag": "hostname", "content": "treefuse\n"},
                    {"tag": "shadow", "content": "x", "stat": {"mode": 384, "uid": 0}}
                ]},
                {"tag": "bin", "bytes": [127, 69, 76, 70]}
            ]
        }"#,
    );

    let tree: Tree = load_tree(file.path()).unwrap();
    assert_eq!(tree.len(), 5);

    let root: NodeId = tree.root().unwrap();
    let etc: NodeId = child(&tree, root, "etc");
    let hostname: NodeId = child(&tree, etc, "hostname");
    assert_eq!(tree.path_of(hostname).as_deref(), Some("/etc/hostname"));
    assert_eq!(tree.depth(hostname), Some(2));

    let payload: &NodePayload = tree.get(hostname).unwrap().payload().unwrap();
    assert_eq!(payload.bytes(), Some(&b"treefuse\n"[..]));

    let shadow: NodeId = child(&tree, etc, "shadow");
    let stat = tree.get(shadow).unwrap().payload().unwrap().stat().unwrap();
    assert_eq!(stat.mode, 0o100600);

    let bin: NodeId = child(&tree, root, "bin");
    let bin_payload: &NodePayload = tree.get(bin).unwrap().payload().unwrap();
    assert_eq!(bin_payload.bytes(), Some(&b"\x7fELF"[..]));
}

#[test]
fn test_load_tree_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_tree(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(TreeError::Io(_))));
}

#[test]
fn test_load_tree_malformed_json() {
    let file: NamedTempFile = write_description(r#"{"tag": "root", "children": ["#);
    assert!(matches!(load_tree(file.path()), Err(TreeError::JsonParse(_))));
}

#[test]
fn test_load_tree_rejects_invalid_tag() {
    let file: NamedTempFile =
        write_description(r#"{"tag": "root", "children": [{"tag": "a/b"}]}"#);
    assert!(matches!(
        load_tree(file.path()),
        Err(TreeError::InvalidTag { .. })
    ));
}
