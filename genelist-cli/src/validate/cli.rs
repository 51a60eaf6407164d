use clap::{Arg, ArgAction, Command};

pub const VALIDATE_CMD: &str = "validate";

pub fn create_validate_cli() -> Command {
    Command::new(VALIDATE_CMD)
        .about("Check a gene list for schema and row errors without resolving anything")
        .arg_required_else_help(true)
        .arg(
            Arg::new("tsv")
                .long("tsv")
                .short('t')
                .required(true)
                .help("Gene list to check (tab separated, optionally gzipped, '-' for stdin)"),
        )
        .arg(
            Arg::new("fail-fast")
                .long("fail-fast")
                .action(ArgAction::SetTrue)
                .help("Stop at the first invalid row"),
        )
}
