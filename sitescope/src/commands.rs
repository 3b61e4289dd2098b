use crate::CLAP_STYLING;
use clap::{arg, command};
use sitescope_core::DEFAULT_CONCURRENCY;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitescope")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitescope")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("catalog")
                .about(
                    "Runs the full discovery pipeline against the organization's domain \
                family and writes the deduplicated site inventory to CSV.",
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the inventory CSV")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value("resmed_sites.csv"),
                )
                .arg(
                    arg!(-t --"threads" <NUM_WORKERS>)
                        .required(false)
                        .help(
                            "The global concurrency bound shared by every network-bound \
                        phase.",
                        )
                        .value_parser(clap::value_parser!(usize))
                        .default_value(DEFAULT_CONCURRENCY.to_string().leak() as &str),
                )
                .arg(
                    arg!(--"no-progress")
                        .required(false)
                        .help("Disable per-phase progress spinners")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
