//! CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn fixture() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let src = dir.path().join("xml");
    fs::create_dir_all(&src).unwrap();

    fs::write(
        src.join("harbor.xml"),
        r#"<room voiceLibs="old.swf">
<layers><layer id="fg"><states><state id="idle" x="1" y="1">
<title><en>Idle</en></title>
<actions><action><title><en>Look</en></title>
<dialog>
<dia puppet="_avatar" sound="h:1"><en>A quiet harbor.</en></dia>
<dia puppet="_avatar" sound="h:2"><en>A quiet harbor.</en></dia>
<dia puppet="_avatar" sound="h:3"><en></en></dia>
</dialog>
</action></actions>
<items/>
</state></states></layer></layers>
<trees/>
</room>"#,
    )
    .unwrap();
    fs::write(
        src.join("global.xml"),
        r#"<global voiceLibs="old.swf"><responses/><items/><combos/></global>"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("template.html"),
        "<html>{{ id }}{{ cast }}{{ content }}</html>",
    )
    .unwrap();
    fs::write(
        dir.path().join("mappings.toml"),
        r#"
registry = ["harbor"]

[avatars]
harbor = "june"
"#,
    )
    .unwrap();
    dir
}

#[test]
fn full_run_prints_counters() {
    let dir = fixture();
    Command::cargo_bin("voiceline")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Defined dialog: 3"))
        .stdout(predicate::str::contains("Empty dialog: 1"))
        .stdout(predicate::str::contains("Duplicate dialog: 1"))
        .stdout(predicate::str::contains("Total unique dialog: 1"));

    assert!(dir.path().join("patched/harbor.xml").exists());
    assert!(dir.path().join("screenplay/index.html").exists());
    assert!(dir.path().join("screenplay/assets/cast_data.js").exists());
}

#[test]
fn missing_mappings_file_fails() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("voiceline")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("mappings"));
}

#[test]
fn missing_input_document_fails() {
    let dir = fixture();
    fs::remove_file(dir.path().join("xml/global.xml")).unwrap();
    Command::cargo_bin("voiceline")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .failure();
}
