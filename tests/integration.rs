// Integration testing drives the binary as a subprocess; the installer is
// substituted through andaime.toml so no real composer is needed.
use std::fs;

fn write_installer_override(root: &std::path::Path, command: &str) {
    let contents = format!("[installer]\ncommand = \"{command}\"\nargs = []\n");
    fs::write(root.join("andaime.toml"), contents).unwrap();
}

#[test]
fn init_scaffolds_an_empty_root() {
    let root = tempfile::tempdir().unwrap();
    write_installer_override(root.path(), "true");

    let mut cmd = assert_cmd::Command::cargo_bin("andaime").unwrap();
    cmd.arg("init").arg(root.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("create"));

    assert!(root.path().join("public/index.php").is_file());
    assert!(root.path().join("app/controllers/HomeController.php").is_file());
}

#[test]
fn init_exits_zero_when_everything_already_exists() {
    let root = tempfile::tempdir().unwrap();
    write_installer_override(root.path(), "true");

    let mut first = assert_cmd::Command::cargo_bin("andaime").unwrap();
    first.arg("init").arg(root.path());
    first.assert().success();

    let mut second = assert_cmd::Command::cargo_bin("andaime").unwrap();
    second.arg("init").arg(root.path());

    second
        .assert()
        .success()
        .stdout(predicates::str::contains("preserved"));
}

#[test]
fn installer_failure_exits_non_zero() {
    let root = tempfile::tempdir().unwrap();
    write_installer_override(root.path(), "false");

    let mut cmd = assert_cmd::Command::cargo_bin("andaime").unwrap();
    cmd.arg("init").arg(root.path());

    cmd.assert().failure();

    assert!(!root.path().join("composer.json").exists());
    assert!(!root.path().join("app").exists());
}

#[test]
fn plan_previews_without_writing() {
    let root = tempfile::tempdir().unwrap();

    let mut cmd = assert_cmd::Command::cargo_bin("andaime").unwrap();
    cmd.arg("plan").arg(root.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("routes"))
        .stdout(predicates::str::contains("index.php"));

    // preview must not create anything
    let leftovers: Vec<_> = fs::read_dir(root.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}
