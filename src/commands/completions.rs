//! Command: generate shell completions.
use std::io;

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsOpts};

/// Write completions for the requested shell to stdout.
pub fn run(opts: &CompletionsOpts) {
    generate(opts.shell, &mut io::stdout());
}

/// Write completions for `shell` to `out`.
pub fn generate(shell: clap_complete::Shell, out: &mut dyn io::Write) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, out);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bash_completions_mention_subcommands() {
        let mut out = Vec::new();
        generate(clap_complete::Shell::Bash, &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("kaizen"));
        assert!(script.contains("install"));
        assert!(script.contains("serve"));
    }
}
