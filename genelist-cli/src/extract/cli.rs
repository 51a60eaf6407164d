use clap::{Arg, ArgAction, Command, value_parser};

pub const EXTRACT_CMD: &str = "extract";

pub fn create_extract_cli() -> Command {
    Command::new(EXTRACT_CMD)
        .about("Resolve, expand and merge a gene list into a BED file for one analysis")
        .arg_required_else_help(true)
        .arg(
            Arg::new("tsv")
                .long("tsv")
                .short('t')
                .required(true)
                .help("Gene list (tab separated, optionally gzipped, '-' for stdin)"),
        )
        .arg(
            Arg::new("analysis")
                .long("analysis")
                .short('a')
                .required(true)
                .help("Analysis to extract: snv, cnv, sv or pindel"),
        )
        .arg(
            Arg::new("tables")
                .long("tables")
                .required(true)
                .action(ArgAction::Append)
                .value_delimiter(',')
                .help("Table tag(s) to select, e.g. aml,all"),
        )
        .arg(
            Arg::new("build")
                .long("build")
                .short('b')
                .default_value("38")
                .help("Genome build: 37 or 38"),
        )
        .arg(
            Arg::new("bed")
                .long("bed")
                .short('o')
                .help(
                    "Output BED path, '.gz' for gzip [default: {tables}_{analysis}_{build}_{date}.bed]",
                ),
        )
        .arg(
            Arg::new("chr")
                .long("chr")
                .action(ArgAction::SetTrue)
                .overrides_with("no-chr")
                .help("Prefix chromosomes with 'chr' (default)"),
        )
        .arg(
            Arg::new("no-chr")
                .long("no-chr")
                .action(ArgAction::SetTrue)
                .overrides_with("chr")
                .help("Write chromosomes without the 'chr' prefix"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('p')
                .default_value("4")
                .value_parser(value_parser!(usize))
                .help("Number of concurrent lookups"),
        )
        .arg(
            Arg::new("fail-fast")
                .long("fail-fast")
                .action(ArgAction::SetTrue)
                .help("Stop at the first invalid row instead of skipping it"),
        )
}
