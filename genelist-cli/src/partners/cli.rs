use clap::{Arg, ArgAction, Command};

pub const PARTNERS_CMD: &str = "partners";

pub fn create_partners_cli() -> Command {
    Command::new(PARTNERS_CMD)
        .about("List the known fusion partners of genes")
        .arg_required_else_help(true)
        .arg(
            Arg::new("gene")
                .long("gene")
                .short('g')
                .required(true)
                .action(ArgAction::Append)
                .value_delimiter(',')
                .help("Gene symbol(s) registered with the partner catalog, e.g. ABL1,KMT2A"),
        )
}
