use testgen::{Gen, Options, SPACE, SuiteId, Tree, memory_testing, print_items};

// Preview of one generated test: `print_case [N] [SEED]`.
fn main() {
    let mut args = std::env::args().skip(1);
    let n: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(8);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);

    let opts = Options {
        seed,
        verbose: false,
        ..Options::new("case")
    };
    let mut testing = memory_testing::<()>(&opts);
    let n = n.max(1);
    let tree = Tree::new(n).unwrap();
    testing.set_test(1, SuiteId::Numbered(1)).unwrap();
    print_items!(testing; n, SPACE, n - 1, Gen(tree)).unwrap();

    let index = testing.current_index();
    let record = testing.manager().registry().get(&index).unwrap();
    println!("== {}", record.file_name());
    print!("{}", String::from_utf8_lossy(record.sink()));
}
