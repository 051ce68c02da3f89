use crate::{
    ForkPolicy, Options, RngUtilities, SuiteId, TestIndex, Testcase, Testing, TestgenResult,
    UniSequence,
};
use std::env;
use std::fmt;
use std::path::PathBuf;

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS]\n\
         \n\
         Generates the test files of a sequence problem (n, then a_1 .. a_n)\n\
         as <ABBR><n>ocen.in samples and <ABBR><suite><letters>.in suites.\n\
         \n\
         Options:\n\
               --abbr ABBR           File name prefix (default seq)\n\
               --seed N              Main seed (default 0)\n\
           -o, --dir DIR             Output directory (default: current)\n\
               --samples N           Number of sample tests (default 2)\n\
               --suites N            Number of graded suites (default 3)\n\
               --tests N             Tests per suite (default 3)\n\
               --max-n N             Largest sequence length (default 1000)\n\
               --max-value N         Largest element (default 1000000000)\n\
               --assume-max N        Largest element the checker accepts\n\
                                     (default: --max-value)\n\
               --no-sample           Start directly with suite 1\n\
               --per-suite-seeds     Fork test engines from per-suite sources\n\
               --manifest            Print a JSON manifest of created files\n\
               --name TEST SUITE     Print the file name of an index and exit\n\
                                     (SUITE is a number or `ocen`)\n\
           -q, --quiet               Only report warnings and errors\n\
           -h, --help                Show this help\n",
        prog = program
    );
}

fn next_value<'a>(args: &'a [String], i: &mut usize, what: &str, flag: &str) -> &'a str {
    *i += 1;
    if *i >= args.len() {
        eprintln!("Missing {} for {}", what, flag);
        std::process::exit(2);
    }
    &args[*i]
}

fn parse_number<T: std::str::FromStr>(s: &str, flag: &str) -> T {
    match s.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Invalid number for {}: {}", flag, s);
            std::process::exit(2);
        }
    }
}

fn parse_suite(s: &str) -> SuiteId {
    match s.to_lowercase().as_str() {
        "ocen" | "sample" => SuiteId::Sample,
        other => {
            let n: u32 = parse_number(other, "--name");
            if n == 0 {
                eprintln!("Suite numbers start at 1 (use `ocen` for samples)");
                std::process::exit(2);
            }
            SuiteId::Numbered(n)
        }
    }
}

fn parse_args() -> (Options, CliMode) {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "testgen".to_string());
    args.remove(0);

    let mut opts = Options::new("seq");
    let mut mode = CliMode::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].clone();
        match flag.as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "--abbr" => {
                opts.abbreviation = next_value(&args, &mut i, "ABBR", &flag).to_string();
            }
            "--seed" => {
                opts.seed = parse_number(next_value(&args, &mut i, "N", &flag), &flag);
            }
            "-o" | "--dir" => {
                opts.output_dir = Some(PathBuf::from(next_value(&args, &mut i, "DIR", &flag)));
            }
            "--samples" => {
                mode.samples = parse_number(next_value(&args, &mut i, "N", &flag), &flag);
            }
            "--suites" => {
                mode.suites = parse_number(next_value(&args, &mut i, "N", &flag), &flag);
            }
            "--tests" => {
                mode.tests = parse_number(next_value(&args, &mut i, "N", &flag), &flag);
                if mode.tests == 0 {
                    eprintln!("--tests must be at least 1");
                    std::process::exit(2);
                }
            }
            "--max-n" => {
                mode.max_n = parse_number(next_value(&args, &mut i, "N", &flag), &flag);
                if mode.max_n == 0 {
                    eprintln!("--max-n must be at least 1");
                    std::process::exit(2);
                }
            }
            "--max-value" => {
                mode.max_value = parse_number(next_value(&args, &mut i, "N", &flag), &flag);
                if mode.max_value == 0 {
                    eprintln!("--max-value must be at least 1");
                    std::process::exit(2);
                }
            }
            "--assume-max" => {
                mode.assume_max = Some(parse_number(next_value(&args, &mut i, "N", &flag), &flag));
            }
            "--no-sample" => {
                opts.start_with_sample = false;
            }
            "--per-suite-seeds" => {
                opts.fork_policy = ForkPolicy::PerSuite;
            }
            "--manifest" => {
                mode.manifest = true;
            }
            "--name" => {
                let test: u32 = parse_number(next_value(&args, &mut i, "TEST", &flag), &flag);
                if test == 0 {
                    eprintln!("Test numbers start at 1");
                    std::process::exit(2);
                }
                let suite = parse_suite(next_value(&args, &mut i, "SUITE", &flag));
                mode.name = Some(TestIndex::new(test, suite));
            }
            "-q" | "--quiet" => {
                mode.quiet = true;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {}", s);
                std::process::exit(2);
            }
            other => {
                eprintln!("Unexpected argument: {}", other);
                std::process::exit(2);
            }
        }
        i += 1;
    }

    opts.verbose = !mode.quiet;
    (opts, mode)
}

struct CliMode {
    samples: u32,
    suites: u32,
    tests: u32,
    max_n: usize,
    max_value: u64,
    assume_max: Option<u64>,
    manifest: bool,
    name: Option<TestIndex>,
    quiet: bool,
}

impl Default for CliMode {
    fn default() -> Self {
        Self {
            samples: 2,
            suites: 3,
            tests: 3,
            max_n: 1000,
            max_value: 1_000_000_000,
            assume_max: None,
            manifest: false,
            name: None,
            quiet: false,
        }
    }
}

fn init_tracing(quiet: bool) {
    let level = if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// One test of the demo problem.
#[derive(Clone, Debug, Default)]
struct SeqCase {
    values: Vec<u64>,
}

impl Testcase for SeqCase {}

impl fmt::Display for SeqCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.values.len())?;
        let mut it = self.values.iter();
        if let Some(first) = it.next() {
            write!(f, "{}", first)?;
            for v in it {
                write!(f, " {}", v)?;
            }
        }
        writeln!(f)
    }
}

fn random_case<F: crate::SinkFactory>(
    testing: &mut Testing<F, SeqCase>,
    min_n: usize,
    max_n: usize,
    max_value: u64,
) -> TestgenResult<SeqCase> {
    let n = testing.uniform(min_n, max_n)?;
    let values = testing.generate(&UniSequence::new(n, 1, max_value)?)?;
    Ok(SeqCase {
        values: values.into_inner(),
    })
}

fn generate<F: crate::SinkFactory>(
    testing: &mut Testing<F, SeqCase>,
    opts: &Options,
    mode: &CliMode,
) -> TestgenResult<()> {
    let max_n = mode.max_n;
    let max_value = mode.max_value;
    let accepted = mode.assume_max.unwrap_or(max_value);
    testing.assume_global(move |tc: &SeqCase| {
        (1..=max_n).contains(&tc.values.len())
            && tc.values.iter().all(|v| (1..=accepted).contains(v))
    });

    if opts.start_with_sample {
        for _ in 0..mode.samples {
            testing.next_test()?;
            let tc = random_case(testing, 1, max_n.min(5), max_value.min(10))?;
            testing.emit(&tc)?;
        }
    }

    let suites = mode.suites as usize;
    for suite in 1..=mode.suites {
        let limit = (max_n * suite as usize / suites).max(1);
        for t in 1..=mode.tests {
            if t == 1 {
                testing.set_test(1, SuiteId::Numbered(suite))?;
                testing.assume_suite(move |tc: &SeqCase| tc.values.len() <= limit);
            } else {
                testing.next_test()?;
            }
            let tc = if t == mode.tests {
                // largest case of the suite
                SeqCase {
                    values: vec![max_value; limit],
                }
            } else {
                random_case(testing, (limit / 2).max(1), limit, max_value)?
            };
            testing.emit(&tc)?;
        }
    }
    testing.flush_all()
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (opts, mode) = parse_args();
    init_tracing(mode.quiet);

    if let Some(index) = mode.name {
        println!("{}", index.file_name(&opts.abbreviation));
        return Ok(());
    }

    if let Some(dir) = &opts.output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut testing: Testing<_, SeqCase> = Testing::new(&opts);
    generate(&mut testing, &opts, &mode)?;

    if mode.manifest {
        #[cfg(feature = "serde")]
        {
            let manifest = serde_json::to_string_pretty(&testing.manifest())?;
            println!("{}", manifest);
        }
        #[cfg(not(feature = "serde"))]
        {
            for entry in testing.manifest() {
                println!("{}", entry.file);
            }
        }
    }
    Ok(())
}
