use super::*;
use std::fs;
use std::io::Write;
use tempfile::tempdir;

fn opts_in(dir: &std::path::Path) -> Options {
    Options {
        output_dir: Some(dir.to_path_buf()),
        ..quiet_opts("pro")
    }
}

#[test]
fn writes_judge_files() {
    let dir = tempdir().unwrap();
    let mut testing = file_testing::<()>(&opts_in(dir.path()));
    testing.next_test().unwrap();
    writeln!(testing, "sample").unwrap();
    testing.next_suite().unwrap();
    writeln!(testing, "graded").unwrap();
    testing.flush_all().unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("pro1ocen.in")).unwrap(),
        "sample\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("pro1a.in")).unwrap(),
        "graded\n"
    );
    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["pro1a.in", "pro1ocen.in"]);
}

#[test]
fn revisit_does_not_truncate() {
    let dir = tempdir().unwrap();
    let mut testing = file_testing::<()>(&opts_in(dir.path()));
    testing.set_test(1, SuiteId::Numbered(2)).unwrap();
    write!(testing, "X").unwrap();
    testing.next_test().unwrap();
    testing.set_test(1, SuiteId::Numbered(2)).unwrap();
    write!(testing, "Y").unwrap();
    testing.flush_all().unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("pro2a.in")).unwrap(), "XY");
    assert_eq!(fs::read_to_string(dir.path().join("pro2b.in")).unwrap(), "");
}

#[test]
fn existing_file_is_replaced_on_first_visit() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("pro1ocen.in"), "stale contents\n").unwrap();
    let mut testing = file_testing::<()>(&opts_in(dir.path()));
    testing.next_test().unwrap();
    writeln!(testing, "fresh").unwrap();
    testing.flush_all().unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("pro1ocen.in")).unwrap(),
        "fresh\n"
    );
}

#[test]
fn skipped_slot_creates_no_file() {
    let dir = tempdir().unwrap();
    let mut testing = file_testing::<()>(&opts_in(dir.path()));
    testing.next_suite().unwrap();
    testing.skip_test().unwrap();
    testing.next_test().unwrap();
    testing.flush_all().unwrap();
    assert!(dir.path().join("pro1a.in").exists());
    assert!(!dir.path().join("pro1b.in").exists());
    assert!(dir.path().join("pro1c.in").exists());
}

#[test]
fn missing_directory_reports_the_file() {
    let dir = tempdir().unwrap();
    let mut testing = file_testing::<()>(&opts_in(&dir.path().join("absent")));
    match testing.next_test() {
        Err(TestgenError::Io { file, .. }) => assert_eq!(file, "pro1ocen.in"),
        other => panic!("expected io error, got {:?}", other),
    }
    assert!(matches!(
        testing.generator(),
        Err(TestgenError::NoActiveTest)
    ));
}

#[test]
fn file_sinks_open_directly() {
    let dir = tempdir().unwrap();
    let mut sinks = FileSinks::in_dir(dir.path());
    let mut sink = sinks.open("x.in").unwrap();
    sink.write_all(b"42\n").unwrap();
    sink.flush().unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("x.in")).unwrap(), "42\n");
}
