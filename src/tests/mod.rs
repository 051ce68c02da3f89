use super::*;

// Shared test helpers
fn quiet_opts(abbr: &str) -> Options {
    Options {
        verbose: false,
        ..Options::new(abbr)
    }
}

fn mem_testing<T: Testcase>(abbr: &str) -> Testing<MemorySinks, T> {
    memory_testing(&quiet_opts(abbr))
}

fn contents<T: Testcase>(testing: &Testing<MemorySinks, T>, index: TestIndex) -> String {
    let record = testing
        .manager()
        .registry()
        .get(&index)
        .expect("record exists");
    String::from_utf8(record.sink().clone()).expect("utf8 output")
}

fn created_names<T: Testcase>(testing: &Testing<MemorySinks, T>) -> Vec<String> {
    testing.manifest().into_iter().map(|e| e.file).collect()
}

mod file_sinks;
mod graph;
mod registry;
