//! Shell completion scripts

use std::io;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Write the completion script for `shell` to stdout
pub fn run(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let mut command = Cli::command();
        let mut buf = Vec::new();
        generate(Shell::Bash, &mut command, "tcop", &mut buf);

        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("tcop"));
        assert!(script.contains("list"));
        assert!(script.contains("attribute"));
    }
}
