use andaime::{
    config::Config,
    report::Outcome,
    scaffold::{self, ScaffoldError},
    templates,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

// `true` exits 0 without touching anything, standing in for a successful
// composer run.
fn passing_config() -> Config {
    let mut config = Config::default();
    config.installer.command = "true".to_string();
    config.installer.args = vec![];
    config
}

fn failing_config() -> Config {
    let mut config = Config::default();
    config.installer.command = "false".to_string();
    config.installer.args = vec![];
    config
}

const EXPECTED_FILES: [&str; 13] = [
    "composer.json",
    ".env",
    "config/config.php",
    "core/Database.php",
    "core/Model.php",
    "core/Controller.php",
    "app/controllers/HomeController.php",
    "app/models/User.php",
    "app/views/home.php",
    "public/index.php",
    "routes/web.php",
    "public/assets/css/style.css",
    "public/assets/js/script.js",
];

#[test]
fn empty_root_gets_the_complete_layout() {
    let root = tempfile::tempdir().unwrap();

    let report = scaffold::try_scaffold(root.path(), &passing_config()).unwrap();

    for directory in templates::DIRECTORIES {
        assert!(root.path().join(directory).is_dir(), "{directory}");
    }
    for file in EXPECTED_FILES {
        assert!(root.path().join(file).is_file(), "{file}");
    }

    // manifest + 9 directories + 12 files, everything freshly created
    assert_eq!(report.created(), 22);
    assert_eq!(report.skipped(), 0);
    assert!(!report.has_failures());
}

#[test]
fn produced_tree_has_no_extras() {
    let root = tempfile::tempdir().unwrap();

    scaffold::try_scaffold(root.path(), &passing_config()).unwrap();

    let mut on_disk: BTreeSet<String> = BTreeSet::new();
    for entry in walkdir::WalkDir::new(root.path()).min_depth(1) {
        let entry = entry.unwrap();
        let relative = entry.path().strip_prefix(root.path()).unwrap();
        on_disk.insert(relative.to_string_lossy().to_string());
    }

    let mut expected: BTreeSet<String> = EXPECTED_FILES.iter().map(|f| f.to_string()).collect();
    // declared directories plus the ancestors create_dir_all fills in
    for directory in [
        "app",
        "app/controllers",
        "app/models",
        "app/views",
        "core",
        "config",
        "public",
        "public/assets",
        "public/assets/css",
        "public/assets/js",
        "public/assets/images",
        "routes",
    ] {
        expected.insert(directory.to_string());
    }

    assert_eq!(on_disk, expected);
}

#[test]
fn second_run_preserves_everything() {
    let root = tempfile::tempdir().unwrap();

    scaffold::try_scaffold(root.path(), &passing_config()).unwrap();
    let second = scaffold::try_scaffold(root.path(), &passing_config()).unwrap();

    assert!(second
        .entries()
        .all(|entry| entry.outcome == Outcome::SkippedExisting));
    assert_eq!(second.created(), 0);
}

#[test]
fn customized_files_survive_byte_for_byte() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("config")).unwrap();
    fs::write(root.path().join("config/config.php"), "X").unwrap();

    let report = scaffold::try_scaffold(root.path(), &passing_config()).unwrap();

    assert_eq!(
        fs::read_to_string(root.path().join("config/config.php")).unwrap(),
        "X"
    );
    assert_eq!(
        report.outcome_for(Path::new("config/config.php")),
        Some(&Outcome::SkippedExisting)
    );
    assert_eq!(
        report.outcome_for(Path::new("config")),
        Some(&Outcome::SkippedExisting)
    );
    // everything else still gets created
    assert!(root.path().join("core/Model.php").is_file());
    assert_eq!(
        report.outcome_for(Path::new("core/Model.php")),
        Some(&Outcome::Created)
    );
}

#[test]
fn installer_failure_leaves_the_root_untouched() {
    let root = tempfile::tempdir().unwrap();

    let result = scaffold::try_scaffold(root.path(), &failing_config());

    assert!(matches!(result, Err(ScaffoldError::Installer(_))));
    // the manifest written before the install attempt is rolled back too
    let leftovers: Vec<_> = fs::read_dir(root.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}

#[test]
fn installer_is_skipped_when_marker_exists() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("vendor")).unwrap();
    fs::write(root.path().join("vendor/autoload.php"), "<?php").unwrap();

    // installer command that would fail if it were spawned
    let report = scaffold::try_scaffold(root.path(), &failing_config()).unwrap();

    assert!(!report.has_failures());
    assert!(root.path().join("public/index.php").is_file());
}

#[test]
fn env_file_carries_the_default_keys() {
    let root = tempfile::tempdir().unwrap();

    scaffold::try_scaffold(root.path(), &passing_config()).unwrap();

    let env = fs::read_to_string(root.path().join(".env")).unwrap();
    for key in ["DB_HOST=", "DB_NAME=", "DB_USER=", "DB_PASS=", "BASE_URL="] {
        assert!(env.contains(key), "{key}");
    }
}

#[test]
fn pre_existing_env_is_not_regenerated() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join(".env"), "DB_HOST=production").unwrap();

    scaffold::try_scaffold(root.path(), &passing_config()).unwrap();

    assert_eq!(
        fs::read_to_string(root.path().join(".env")).unwrap(),
        "DB_HOST=production"
    );
}
