//! Command: print version information.

/// Version string: `KAIZEN_VERSION` from the build, else the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("KAIZEN_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the kaizen version to stdout.
pub fn run() {
    println!("kaizen {}", version());
}
