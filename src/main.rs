use clap::Parser;
use lightcurve_ingestor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        // First CTRL+C cancels the token; commands stop accepting new
        // work and drain what is in flight.
        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                signal_token.cancel();
            }
        });

        commands::run(args, cancellation_token).await
    });

    match result {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Light-curve Ingestor - CSV to Warp10 Time Series Converter");
    println!("==========================================================");
    println!();
    println!("Convert Kepler/K2 light-curve CSV exports into labeled time series");
    println!("and push them, batched per file, to a Warp10 storage backend.");
    println!();
    println!("USAGE:");
    println!("    lightcurve-ingestor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    ingest      Process every light-curve file in a directory once");
    println!("    watch       Watch a directory and process new files as they appear");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Push every light-curve file in a directory:");
    println!("    lightcurve-ingestor ingest --path /data/lightcurves \\");
    println!("                               --endpoint http://localhost:8080 --token wRiTe");
    println!();
    println!("    # Validate a directory without pushing anything:");
    println!("    lightcurve-ingestor ingest --path /data/lightcurves \\");
    println!("                               --endpoint http://localhost:8080 --token wRiTe --dry-run");
    println!();
    println!("    # Watch a drop directory, deleting files once pushed:");
    println!("    lightcurve-ingestor watch --path /data/incoming \\");
    println!("                              --endpoint http://localhost:8080 --token wRiTe");
    println!();
    println!("For detailed help on any command, use:");
    println!("    lightcurve-ingestor <COMMAND> --help");
}
