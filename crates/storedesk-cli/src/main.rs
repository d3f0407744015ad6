fn main() {
    if let Err(error) = storedesk_cli::run() {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
