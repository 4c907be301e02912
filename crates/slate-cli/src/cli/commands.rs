//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("slate")
        .about("Inspect, format and check slate configuration files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tokens_command())
        .subcommand(fmt_command())
        .subcommand(check_command())
}

/// Dump the token stream of a file.
pub fn tokens_command() -> Command {
    Command::new("tokens")
        .about("Show the tokens of a configuration file")
        .after_help(
            r#"EXAMPLES:
  slate tokens app.cfg            # one token per line
  slate tokens app.cfg --spans    # with byte ranges
  echo 'a = b' | slate tokens -   # from stdin"#,
        )
        .arg(file_arg())
        .arg(spans_arg())
        .arg(color_arg())
}

/// Reprint a file in canonical form.
pub fn fmt_command() -> Command {
    Command::new("fmt")
        .about("Print a configuration file in canonical form")
        .after_help(
            r#"EXAMPLES:
  slate fmt app.cfg               # pretty, tab indented
  slate fmt app.cfg --compact     # single line"#,
        )
        .arg(file_arg())
        .arg(compact_arg())
        .arg(color_arg())
}

/// Validate a file.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check that a configuration file parses")
        .after_help(
            r#"EXAMPLES:
  slate check app.cfg             # silent on success, exit code 1 on error"#,
        )
        .arg(file_arg())
        .arg(color_arg())
}
