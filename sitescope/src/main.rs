use clap::ArgMatches;
use commands::command_argument_builder;
use sitescope_core::inventory::write_inventory;
use sitescope_core::{print_banner, run_catalog, CatalogOptions, DEFAULT_CONCURRENCY};
use std::path::PathBuf;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    match chosen_command.subcommand() {
        Some(("catalog", primary_command)) => handle_catalog(primary_command, quiet).await,
        None => {
            // No subcommand provided, just show the banner
        }
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

async fn handle_catalog(sub_matches: &ArgMatches, quiet: bool) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let output = sub_matches.get_one::<PathBuf>("output").unwrap();
    let threads = sub_matches
        .get_one::<usize>("threads")
        .unwrap_or(&DEFAULT_CONCURRENCY);
    let no_progress = sub_matches.get_flag("no-progress");

    if !quiet {
        println!("Cataloging the organization's domain family");
        println!("Workers: {}", threads);
        println!("Output: {}\n", output.display());
    }

    let options = CatalogOptions {
        concurrency: *threads,
        show_progress: !no_progress && !quiet,
    };

    let inventory = run_catalog(&options).await;

    if let Err(e) = write_inventory(output, &inventory) {
        eprintln!("Failed to write inventory: {}", e);
        std::process::exit(1);
    }

    if !quiet {
        println!(
            "\nCatalog complete! {} unique sites written to {}",
            inventory.len(),
            output.display()
        );
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
