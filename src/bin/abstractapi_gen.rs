fn main() {
    if let Err(err) = abstractapi::cli::run_cli() {
        eprintln!("❌ {err:#}");
        std::process::exit(1);
    }
}
