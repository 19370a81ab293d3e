// Tue Jan 13 2026 - Alex

use sc3k_demangle::ui::{cli, ErrorDisplay};

fn main() {
    if let Err(e) = cli::run() {
        ErrorDisplay::new().print_report(&e);
        std::process::exit(1);
    }
}
