use super::*;

fn ids(set: &FileSet) -> Vec<&str> {
    set.files().iter().map(FileId::as_str).collect()
}

#[test]
fn exclusion_rule_filters_initial_files() {
    let mut set = FileSet::new();
    set.update_exclusions(["test"]);
    let accepted = set.set_initial([FileId::from("src/a.js"), FileId::from("src/a.test.js")]);

    assert_eq!(accepted, 1);
    assert_eq!(ids(&set), vec!["src/a.js"]);
}

#[test]
fn empty_rules_exclude_nothing() {
    let mut set = FileSet::new();
    set.set_initial([FileId::from("node_modules/x.js"), FileId::from("README.md")]);
    assert_eq!(set.len(), 2);
}

#[test]
fn exclusion_matching_is_case_insensitive() {
    let mut set = FileSet::new();
    set.update_exclusions(["Vendor"]);
    assert!(!set.add(FileId::from("file:///app/VENDOR/angular.js")));
    assert!(set.add(FileId::from("file:///app/src/app.js")));
}

#[test]
fn rules_are_trimmed_lowercased_and_deduplicated() {
    let mut set = FileSet::new();
    set.update_exclusions([" Dist ", "dist", "", "  "]);
    assert_eq!(set.exclusions().to_vec(), vec!["dist".to_string()]);
}

#[test]
fn extension_filter_accepts_only_matching_suffix() {
    let mut set = FileSet::new();
    set.set_extensions(["js"]);
    assert_eq!(set.extensions().to_vec(), vec![".js".to_string()]);
    assert!(set.add(FileId::from("file:///app/Main.JS")));
    assert!(!set.add(FileId::from("file:///app/index.html")));
    assert!(!set.add(FileId::from("file:///app/app.json")));
}

#[test]
fn add_ignores_duplicates() {
    let mut set = FileSet::new();
    assert!(set.add(FileId::from("a.js")));
    assert!(!set.add(FileId::from("a.js")));
    assert_eq!(set.len(), 1);
}

#[test]
fn rule_changes_are_not_retroactive() {
    let mut set = FileSet::new();
    set.set_initial([FileId::from("src/a.test.js"), FileId::from("src/b.js")]);
    set.update_exclusions(["test"]);

    assert!(set.contains(&FileId::from("src/a.test.js")));
    assert!(!set.add(FileId::from("src/c.test.js")));
}

#[test]
fn rename_replaces_in_place_without_refiltering() {
    let mut set = FileSet::new();
    set.set_initial([FileId::from("a.js"), FileId::from("b.js"), FileId::from("c.js")]);
    set.update_exclusions(["mock"]);

    assert!(set.rename(&FileId::from("b.js"), FileId::from("mock.js")));
    assert_eq!(ids(&set), vec!["a.js", "mock.js", "c.js"]);
}

#[test]
fn rename_of_untracked_file_is_noop() {
    let mut set = FileSet::new();
    set.add(FileId::from("a.js"));
    assert!(!set.rename(&FileId::from("zzz.js"), FileId::from("b.js")));
    assert_eq!(ids(&set), vec!["a.js"]);
}

#[test]
fn rename_onto_tracked_file_drops_old_entry() {
    let mut set = FileSet::new();
    set.set_initial([FileId::from("a.js"), FileId::from("b.js")]);
    assert!(set.rename(&FileId::from("a.js"), FileId::from("b.js")));
    assert_eq!(ids(&set), vec!["b.js"]);
}

#[test]
fn remove_reports_whether_file_was_tracked() {
    let mut set = FileSet::new();
    set.add(FileId::from("a.js"));
    assert!(set.remove(&FileId::from("a.js")));
    assert!(!set.remove(&FileId::from("a.js")));
    assert!(set.is_empty());
}

#[test]
fn set_initial_replaces_previous_contents() {
    let mut set = FileSet::new();
    set.set_initial([FileId::from("a.js")]);
    set.set_initial([FileId::from("b.js")]);
    assert_eq!(ids(&set), vec!["b.js"]);
}

#[test]
fn large_initial_set_keeps_order_and_drops_duplicates() {
    let uris: Vec<FileId> = (0..100_000)
        .map(|i| FileId::new(format!("file:///workspace/app/src/feature{}/component{i}.js", i % 97)))
        .collect();
    let mut set = FileSet::new();
    set.set_extensions([".js"]);

    let started = std::time::Instant::now();
    let accepted = set.set_initial(uris.iter().cloned().chain(uris.iter().take(1_000).cloned()));
    let elapsed = started.elapsed();

    assert_eq!(accepted, uris.len());
    assert_eq!(set.files(), uris.as_slice());
    assert!(set.contains(&uris[99_999]));
    assert!(elapsed < std::time::Duration::from_secs(5), "set_initial took {elapsed:?}");
}

#[test]
fn membership_follows_rename_and_remove() {
    let mut set = FileSet::new();
    set.set_initial([FileId::from("a.js"), FileId::from("b.js")]);

    set.rename(&FileId::from("a.js"), FileId::from("c.js"));
    assert!(!set.contains(&FileId::from("a.js")));
    assert!(set.contains(&FileId::from("c.js")));
    assert!(set.add(FileId::from("a.js")), "old name can be tracked again");

    set.rename(&FileId::from("c.js"), FileId::from("b.js"));
    assert!(!set.contains(&FileId::from("c.js")));
    assert_eq!(ids(&set), vec!["b.js", "a.js"]);

    set.remove(&FileId::from("b.js"));
    assert!(!set.contains(&FileId::from("b.js")));
    assert!(set.add(FileId::from("b.js")));
}
