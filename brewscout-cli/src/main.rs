//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = brewscout_cli::run() {
        eprintln!("brewscout: {err}");
        std::process::exit(1);
    }
}
