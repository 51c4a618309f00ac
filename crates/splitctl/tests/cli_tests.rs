//! Argument parsing tests for splitctl

use clap::Parser;
use splitctl::cli::{Cli, Commands};
use std::path::PathBuf;

#[test]
fn test_scan_args() {
    let cli = Cli::try_parse_from(["splitctl", "scan", "receipt.jpg", "--json"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Scan {
            image: PathBuf::from("receipt.jpg"),
            json: true,
        }
    );
    assert!(!cli.verbose);
}

#[test]
fn test_summary_args_with_tip_and_globals() {
    let cli = Cli::try_parse_from([
        "splitctl",
        "summary",
        "-",
        "--tip",
        "15",
        "-v",
        "--config",
        "/tmp/split.toml",
    ])
    .unwrap();
    assert_eq!(
        cli.command,
        Commands::Summary {
            bill: "-".to_string(),
            tip: Some(15.0),
            json: false,
        }
    );
    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/split.toml")));
}

#[test]
fn test_quick_split_args() {
    let cli = Cli::try_parse_from(["splitctl", "quick-split", "bill.json"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::QuickSplit {
            bill: "bill.json".to_string(),
            json: false,
        }
    );
}

#[test]
fn test_missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["splitctl"]).is_err());
    assert!(Cli::try_parse_from(["splitctl", "summary", "bill.json", "--tip", "lots"]).is_err());
}
