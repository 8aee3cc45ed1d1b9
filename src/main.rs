use clap::Parser;
use feed_quality::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        // Ctrl+C stops scheduling new chunks; the command reports what finished
        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nReceived CTRL+C, finishing in-flight chunks...");
                signal_token.cancel();
            }
        });

        commands::run(args, cancellation_token).await
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Feed Quality - Product Feed Data-Quality Auditor");
    println!("================================================");
    println!();
    println!("Check Google Shopping style product feeds (CSV or TSV) for missing");
    println!("attributes, malformed identifiers, text defects and likely misspellings.");
    println!();
    println!("USAGE:");
    println!("    feed-quality <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    analyze         Run every data-quality rule over a feed");
    println!("    search-terms    Derive candidate search terms from a feed");
    println!("    help            Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Analyze a feed with a spelling dictionary:");
    println!("    feed-quality analyze products.tsv --dictionary frequency_dictionary_en.txt");
    println!();
    println!("    # Machine-readable findings in chunks of 1000 records:");
    println!("    feed-quality analyze products.csv --chunk-size 1000 --output-format json -o report.json");
    println!();
    println!("    # Search terms with keyword-planner volumes:");
    println!("    feed-quality search-terms products.csv --volumes keyword_volumes.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    feed-quality <COMMAND> --help");
}
