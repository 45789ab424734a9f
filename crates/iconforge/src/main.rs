//! iconforge - pack the toolchain's icon sources into platform containers.
//!
//! Run from the repository root with no arguments. Directory conventions
//! come from `iconforge.toml` if present, otherwise the checked-in defaults.

use tracing_subscriber::EnvFilter;

use iconforge::{convert, Layout};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let layout = match Layout::load_or_default() {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    match convert::run(&layout) {
        Ok(report) => {
            print!("{report}");
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
