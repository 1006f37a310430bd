//! `formsmith` binary. Argument parsing, config and dispatch live in
//! `formsmith::cli`; a failed command exits with status 1.

use formsmith::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
