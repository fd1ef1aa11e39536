use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn snippetgen(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("snippetgen").expect("binary exists");
    cmd.current_dir(workdir)
        .env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir.join(".config"))
        .env_remove("SNIPPETGEN_PACKAGE")
        .env_remove("SNIPPETGEN_SKIP")
        .env_remove("SNIPPETGEN_LOG");
    cmd
}

fn write_tree(root: &Path) {
    fs::create_dir_all(root.join("tree/a")).expect("create tree");
    fs::write(
        root.join("tree/a/ex.txt"),
        "one\ntwo\n// @snippet_begin(Hello)\nprint(1)\n// @snippet_end\n",
    )
    .expect("write snippet file");
}

#[test]
fn help_displays_usage() {
    let temp = tempfile::tempdir().expect("tempdir");
    snippetgen(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--skip-dir"));
}

#[test]
fn writes_module_to_stdout() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_tree(temp.path());

    snippetgen(temp.path())
        .args(["--dir", "tree", "--rel-base", "tree", "--pkg", "examples"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("// Code generated by snippetgen"))
        .stdout(predicate::str::contains("pub mod examples {"))
        .stdout(predicate::str::contains(r#"pub const Hello: &[u8] = b"print(1)\n";"#))
        .stdout(predicate::str::contains(r#"file: "a/ex.txt","#));
}

#[test]
fn defaults_scan_current_directory() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_tree(temp.path());

    snippetgen(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("pub mod generated {"))
        .stdout(predicate::str::contains(r#"file: "tree/a/ex.txt","#));
}

#[test]
fn extraction_errors_are_warnings() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_tree(temp.path());
    fs::write(temp.path().join("tree/broken.rs"), "// @snippet_begin(Open)\n").expect("write");

    snippetgen(temp.path())
        .args(["--dir", "tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pub const Hello"))
        .stdout(predicate::str::contains("Open").not())
        .stderr(predicate::str::contains("failed to extract snippets"));
}

#[test]
fn invalid_module_name_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_tree(temp.path());

    snippetgen(temp.path())
        .args(["--dir", "tree", "--pkg", "not valid"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid module name"));
}

#[test]
fn output_file_instead_of_stdout() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_tree(temp.path());

    snippetgen(temp.path())
        .args(["--dir", "tree", "--rel-base", "tree", "-o", "out/snippets.rs"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(temp.path().join("out/snippets.rs")).expect("output");
    assert!(written.contains("pub const HelloLocation: Location = Location {"));
}

#[test]
fn workspace_config_and_skip_flag() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_tree(temp.path());
    fs::write(
        temp.path().join(".snippetgen.toml"),
        "[generate]\npackage = \"from_config\"\n",
    )
    .expect("write config");

    snippetgen(temp.path())
        .args(["--skip-dir", "tree/a/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pub mod from_config {"))
        .stdout(predicate::str::contains("Hello").not());
}

#[test]
fn print_config_reflects_flags() {
    let temp = tempfile::tempdir().expect("tempdir");
    snippetgen(temp.path())
        .args(["--print-config", "--pkg", "cli_pkg", "--rel-base", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("package = \"cli_pkg\""))
        .stdout(predicate::str::contains("rel_base = \"\""));
}

#[test]
fn completions_are_generated() {
    let temp = tempfile::tempdir().expect("tempdir");
    snippetgen(temp.path())
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snippetgen"));
}

#[test]
fn workspace_config_paths_follow_the_config_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let repo = temp.path().join("repo");
    fs::create_dir_all(repo.join(".git")).expect("create .git");
    fs::create_dir_all(repo.join("docs")).expect("create docs");
    fs::create_dir_all(repo.join("sub")).expect("create sub");
    fs::write(
        repo.join(".snippetgen.toml"),
        "[scan]\ndir = \"docs\"\nrel_base = \".\"\n",
    )
    .expect("write config");
    fs::write(
        repo.join("docs/a.txt"),
        "@snippet_begin(A)\nbody\n@snippet_end\n",
    )
    .expect("write snippet file");

    for workdir in [repo.clone(), repo.join("sub")] {
        snippetgen(&workdir)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"pub const A: &[u8] = b"body\n";"#))
            .stdout(predicate::str::contains(r#"file: "docs/a.txt","#));
    }
}
