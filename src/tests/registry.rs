use super::*;
use std::io;

fn mem_registry(policy: ForkPolicy) -> Registry<MemorySinks> {
    Registry::new(MemorySinks, "pro", 0, policy)
}

#[test]
fn resolve_creates_named_record() {
    let mut reg = mem_registry(ForkPolicy::Global);
    assert!(reg.is_empty());
    let record = reg.resolve(TestIndex::numbered(2, 1)).unwrap();
    assert_eq!(record.file_name(), "pro1b.in");
    assert!(record.sink().is_empty());
    assert_eq!(reg.len(), 1);
    assert!(reg.contains(&TestIndex::numbered(2, 1)));
    assert!(!reg.contains(&TestIndex::numbered(1, 1)));
}

#[test]
fn resolve_memoizes_stream_and_engine() {
    let mut reg = mem_registry(ForkPolicy::Global);
    let idx = TestIndex::sample(1);
    let first = {
        let record = reg.resolve(idx).unwrap();
        record.sink_mut().extend_from_slice(b"X");
        record.generator().clone()
    };
    reg.resolve(TestIndex::sample(2)).unwrap();
    let record = reg.resolve(idx).unwrap();
    record.sink_mut().extend_from_slice(b"Y");
    assert!(record.generator().same_engine(&first));
    assert_eq!(record.sink().as_slice(), b"XY");
    assert_eq!(reg.len(), 2);
}

#[test]
fn records_fork_the_source_in_visit_order() {
    let mut reg = mem_registry(ForkPolicy::Global);
    let a = reg.resolve(TestIndex::numbered(1, 1)).unwrap().generator().snapshot();
    let b = reg.resolve(TestIndex::numbered(2, 1)).unwrap().generator().snapshot();
    // a revisit does not consume a fork
    reg.resolve(TestIndex::numbered(1, 1)).unwrap();
    let c = reg.resolve(TestIndex::sample(1)).unwrap().generator().snapshot();

    let mut source = Xoshiro256pp::new(0);
    assert_eq!(a, source.fork());
    assert_eq!(b, source.fork());
    assert_eq!(c, source.fork());
}

#[test]
fn first_record_draws_reference_values() {
    let mut reg = mem_registry(ForkPolicy::Global);
    let values: Vec<i32> = (1..=4)
        .map(|t| {
            let handle = reg.resolve(TestIndex::numbered(t, 1)).unwrap().generator().clone();
            handle.clone().uniform(1, 100).unwrap()
        })
        .collect();
    assert_eq!(values, vec![4, 12, 44, 94]);
}

#[test]
fn per_suite_sources_are_long_jumps_apart() {
    assert_eq!(suite_source(9, SuiteId::Sample), Xoshiro256pp::new(9));
    let mut expected = Xoshiro256pp::new(9);
    expected.long_jump();
    expected.long_jump();
    assert_eq!(suite_source(9, SuiteId::Numbered(2)), expected);
}

#[test]
fn per_suite_engines_ignore_other_suites() {
    let mut busy = Registry::new(MemorySinks, "pro", 9, ForkPolicy::PerSuite);
    for t in 1..=5 {
        busy.resolve(TestIndex::sample(t)).unwrap();
    }
    busy.resolve(TestIndex::numbered(1, 1)).unwrap();
    let busy_2a = busy.resolve(TestIndex::numbered(1, 2)).unwrap().generator().snapshot();
    let busy_2b = busy.resolve(TestIndex::numbered(2, 2)).unwrap().generator().snapshot();

    let mut quiet = Registry::new(MemorySinks, "pro", 9, ForkPolicy::PerSuite);
    let quiet_2a = quiet.resolve(TestIndex::numbered(1, 2)).unwrap().generator().snapshot();
    let quiet_2b = quiet.resolve(TestIndex::numbered(2, 2)).unwrap().generator().snapshot();

    assert_eq!(busy_2a, quiet_2a);
    assert_eq!(busy_2b, quiet_2b);

    let mut source = suite_source(9, SuiteId::Numbered(2));
    assert_eq!(quiet_2a, source.fork());
    assert_eq!(quiet_2b, source.fork());
}

#[test]
fn reseed_only_affects_new_records() {
    let mut reg = mem_registry(ForkPolicy::Global);
    let old = reg.resolve(TestIndex::sample(1)).unwrap().generator().snapshot();
    reg.reseed(7);
    assert_eq!(reg.seed(), 7);
    assert_eq!(reg.fork_policy(), ForkPolicy::Global);
    let kept = reg.resolve(TestIndex::sample(1)).unwrap().generator().snapshot();
    let fresh = reg.resolve(TestIndex::sample(2)).unwrap().generator().snapshot();
    assert_eq!(old, kept);
    assert_eq!(fresh, Xoshiro256pp::new(7));
}

#[test]
fn manifest_lists_creation_order() {
    let mut reg = mem_registry(ForkPolicy::Global);
    for idx in [
        TestIndex::numbered(1, 2),
        TestIndex::sample(1),
        TestIndex::numbered(1, 2),
        TestIndex::numbered(27, 1),
    ] {
        reg.resolve(idx).unwrap();
    }
    let files: Vec<String> = reg.manifest().into_iter().map(|e| e.file).collect();
    assert_eq!(files, vec!["pro2a.in", "pro1ocen.in", "pro1aa.in"]);
    assert_eq!(reg.created()[1], TestIndex::sample(1));
    assert_eq!(reg.abbreviation(), "pro");
    assert_eq!(reg.file_name(&TestIndex::sample(4)), "pro4ocen.in");
}

struct BrokenSinks;

impl SinkFactory for BrokenSinks {
    type Sink = Vec<u8>;

    fn open(&mut self, file_name: &str) -> TestgenResult<Vec<u8>> {
        Err(TestgenError::io(
            file_name,
            io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        ))
    }
}

#[test]
fn failed_open_leaves_no_record() {
    let mut reg = Registry::new(BrokenSinks, "pro", 0, ForkPolicy::Global);
    match reg.resolve(TestIndex::sample(1)) {
        Err(TestgenError::Io { file, source }) => {
            assert_eq!(file, "pro1ocen.in");
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected io error, got {:?}", other.map(|r| r.file_name().to_string())),
    }
    assert!(reg.is_empty());
    assert!(reg.manifest().is_empty());
}

#[test]
fn flush_all_on_memory_sinks() {
    let mut reg = mem_registry(ForkPolicy::Global);
    reg.resolve(TestIndex::sample(1)).unwrap();
    reg.resolve(TestIndex::sample(2)).unwrap();
    assert!(reg.flush_all().is_ok());
}

#[cfg(feature = "serde")]
#[test]
fn manifest_serializes() {
    let mut reg = mem_registry(ForkPolicy::Global);
    reg.resolve(TestIndex::numbered(1, 3)).unwrap();
    reg.resolve(TestIndex::sample(2)).unwrap();
    let json = serde_json::to_value(reg.manifest()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"file": "pro3a.in", "index": {"suite": {"numbered": 3}, "test": 1}},
            {"file": "pro2ocen.in", "index": {"suite": "sample", "test": 2}},
        ])
    );
}
