use std::fs;

use bure_core::BureError;
use bure_prompt::{FilePromptStore, InMemoryPromptStore, PromptStore};

#[test]
fn file_store_reads_named_resource() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("classify.txt"), "Pick a tool.").unwrap();

    let store = FilePromptStore::new(dir.path());
    assert_eq!(store.root(), dir.path());
    assert_eq!(store.get_prompt("classify").unwrap(), "Pick a tool.");
    assert_eq!(store.get_prompt("_classify").unwrap(), "Pick a tool.");
}

#[test]
fn file_store_is_repeatable() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("search_for_recipe.txt"), "Find it.").unwrap();

    let store = FilePromptStore::new(dir.path());
    let first = store.get_prompt("search_for_recipe").unwrap();
    let second = store.get_prompt("search_for_recipe").unwrap();
    assert_eq!(first, second);
}

#[test]
fn file_store_reports_missing_prompt() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FilePromptStore::new(dir.path());
    let err = store.get_prompt("nope").unwrap_err();
    assert!(matches!(err, BureError::PromptNotFound { name } if name == "nope"));
}

#[test]
fn in_memory_store_lookup() {
    let store = InMemoryPromptStore::new().with_prompt("classify", "Pick.");
    assert_eq!(store.get_prompt("classify").unwrap(), "Pick.");
    assert!(matches!(
        store.get_prompt("generate_recipe_with_ingredients"),
        Err(BureError::PromptNotFound { .. })
    ));
}
