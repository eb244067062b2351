use projtree_core::{
    DEFAULT_MARKER_FILE, EntryKind, ListingEntry, LogicalPath, ProjectMembershipOracle,
    ProjtreeSettings, TreeError,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_settings_from_toml() {
    let settings = ProjtreeSettings::from_toml(
        r#"
        [tree]
        root = "/srv/projects"
        chunk_size = 1024

        [members]
        azkaban = ["Alpha", "Beta"]
        guest = []
        "#,
    )
    .unwrap();

    assert_eq!(settings.tree.root, PathBuf::from("/srv/projects"));
    assert_eq!(settings.tree.chunk_size, 1024);
    assert_eq!(settings.tree.marker_file, DEFAULT_MARKER_FILE);
    assert_eq!(settings.members.len(), 2);

    let access = settings.members.accessible_project_names("azkaban");
    assert!(access.contains("Alpha"));
    assert!(access.contains("Beta"));
    assert!(settings.members.accessible_project_names("guest").is_empty());
}

#[test]
fn test_settings_without_members() {
    let settings = ProjtreeSettings::from_toml("[tree]\nroot = \"/srv\"\n").unwrap();
    assert!(settings.members.is_empty());
    assert!(settings.members.accessible_project_names("anyone").is_empty());
}

#[test]
fn test_settings_rejects_zero_chunk_size() {
    let err = ProjtreeSettings::from_toml("[tree]\nroot = \"/srv\"\nchunk_size = 0\n").unwrap_err();
    assert!(matches!(err, TreeError::InvalidConfig { .. }));
}

#[test]
fn test_settings_rejects_malformed_toml() {
    let err = ProjtreeSettings::from_toml("[tree\nroot = ").unwrap_err();
    assert!(matches!(err, TreeError::InvalidConfig { .. }));
}

#[test]
fn test_settings_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        "[tree]\nroot = \"/srv\"\nmarker_file = \"displayname\"\n",
    )
    .unwrap();

    let settings = ProjtreeSettings::load(&path).unwrap();
    assert_eq!(settings.tree.marker_file, "displayname");

    let missing = ProjtreeSettings::load(&temp.path().join("absent.toml")).unwrap_err();
    assert!(missing.is_not_found());
}

#[test]
fn test_default_settings_path() {
    let path = ProjtreeSettings::default_path();
    assert!(path.ends_with("projtree/config.toml"));
}

#[test]
fn test_listing_entry_serialization() {
    let entry = ListingEntry::directory("/projA/", "Alpha");
    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["kind"], "directory");
    assert_eq!(json["path"], "/projA/");
    assert_eq!(json["label"], "Alpha");

    let parent = ListingEntry::parent("/");
    assert!(parent.is_parent());
    assert_eq!(parent.label, "parent");
    assert_eq!(EntryKind::File.to_string(), "file");
    assert_eq!("parent".parse::<EntryKind>().unwrap(), EntryKind::Parent);
}

#[test]
fn test_logical_path_round_trips_through_links() {
    let path: LogicalPath = "/projA/flows/".parse().unwrap();
    assert_eq!(path.dir_link(), "/projA/flows/");
    assert_eq!(LogicalPath::parse(&path.dir_link()).unwrap(), path);
    assert_eq!(LogicalPath::parse(&path.file_link()).unwrap(), path);
}
