fn main() {
    if let Err(e) = testgen::cli::run() {
        eprintln!("testgen: {}", e);
        std::process::exit(1);
    }
}
