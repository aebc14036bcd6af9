fn main() {
    fluid_core::init();

    if let Err(err) = fluid_core::cli::run_cli() {
        eprintln!("fatal: {}", err);
        std::process::exit(1);
    }
}
