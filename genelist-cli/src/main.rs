mod extract;
mod partners;
mod validate;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "genelist";
    pub const DEFAULT_LOG_FILTER: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about(
            "Curate gene, transcript, exon and region lists into merged, annotated BED files for variant calling.",
        )
        .subcommand_required(true)
        .subcommand(validate::cli::create_validate_cli())
        .subcommand(partners::cli::create_partners_cli())
        .subcommand(extract::cli::create_extract_cli())
}

fn init_logging() {
    let filters =
        std::env::var("RUST_LOG").unwrap_or_else(|_| consts::DEFAULT_LOG_FILTER.to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // VALIDATE
        //
        Some((validate::cli::VALIDATE_CMD, matches)) => {
            validate::handlers::run_validate(matches)?;
        }

        //
        // PARTNERS
        //
        Some((partners::cli::PARTNERS_CMD, matches)) => {
            partners::handlers::run_partners(matches)?;
        }

        //
        // EXTRACT
        //
        Some((extract::cli::EXTRACT_CMD, matches)) => {
            extract::handlers::run_extract(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
