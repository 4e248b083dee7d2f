use std::process;

fn main() {
    if let Err(err) = session_enricher::cli::run() {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
