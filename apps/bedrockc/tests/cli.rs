//! End-to-end CLI smoke tests: write real source files to a temp directory
//! and drive `bedrockc::run` directly rather than spawning a subprocess.

use bedrockc::cli::Cli;
use std::io::Write;
use std::path::PathBuf;

fn write_file(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

fn cli(file: PathBuf) -> Cli {
    Cli {
        file,
        import_paths: Vec::new(),
        token_table: false,
        pretty_print: false,
        silent: true,
        list_files: false,
    }
}

#[test]
fn clean_file_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "main.brk", "mod Alpha {}");
    assert_eq!(bedrockc::run(&cli(path)), 0);
}

#[test]
fn unbalanced_braces_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "bad.brk", "fn foo( {}");
    assert_eq!(bedrockc::run(&cli(path)), 1);
}

#[test]
fn missing_root_file_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.brk");
    assert_eq!(bedrockc::run(&cli(path)), 1);
}

#[test]
fn redefinition_is_reported_but_pipeline_still_succeeds_with_an_error_exit() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "redef.brk", "fn f() {} fn f() {}");
    assert_eq!(bedrockc::run(&cli(path)), 1);
}

#[test]
fn import_across_two_files_resolves() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "lib.brk", "fn helper() {}");
    let main_path = write_file(dir.path(), "main.brk", "import \"lib.brk\";");
    assert_eq!(bedrockc::run(&cli(main_path)), 0);
}
