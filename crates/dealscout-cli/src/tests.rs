use super::*;

#[test]
fn parses_run_command_with_defaults() {
    let cli = Cli::try_parse_from([
        "dealscout",
        "run",
        "--search-term",
        "desk lamp",
        "--min",
        "10",
        "--max",
        "50",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Run {
            search_term,
            min,
            max,
            output_name,
            dry_run,
        }) => {
            assert_eq!(search_term, "desk lamp");
            assert_eq!((min, max), (10, 50));
            assert!(output_name.is_none());
            assert!(!dry_run);
        }
        other => panic!("expected Run, got: {other:?}"),
    }
}

#[test]
fn parses_run_command_with_output_name_and_dry_run() {
    let cli = Cli::try_parse_from([
        "dealscout",
        "run",
        "--search-term",
        "lamp",
        "--min",
        "0",
        "--max",
        "25",
        "--output-name",
        "cheap lamps",
        "--dry-run",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            output_name: Some(ref name),
            dry_run: true,
            ..
        }) if name == "cheap lamps"
    ));
}

#[test]
fn run_requires_price_bounds() {
    let result = Cli::try_parse_from(["dealscout", "run", "--search-term", "lamp"]);
    assert!(result.is_err(), "expected missing --min/--max to be rejected");
}

#[test]
fn run_rejects_negative_bound() {
    let result = Cli::try_parse_from([
        "dealscout",
        "run",
        "--search-term",
        "lamp",
        "--min",
        "-5",
        "--max",
        "10",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_inspect_command() {
    let cli = Cli::try_parse_from(["dealscout", "inspect", "B07XJ8C8F5"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Inspect { ref asin }) if asin == "B07XJ8C8F5"
    ));
}

#[test]
fn parses_parse_price_with_currency() {
    let cli =
        Cli::try_parse_from(["dealscout", "parse-price", "$12\\n99", "--currency", "$"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::ParsePrice { ref raw, currency: Some(ref c) }) if raw == "$12\\n99" && c == "$"
    ));
}

#[test]
fn parse_price_with_currency_needs_no_config() {
    let cli = Cli::try_parse_from(["dealscout", "parse-price", "£12", "--currency", "£"]).unwrap();
    assert!(!cli.command.expect("command").needs_config());
}

#[test]
fn commands_reading_site_settings_need_config() {
    for args in [
        vec!["dealscout", "parse-price", "£12"],
        vec!["dealscout", "inspect", "B07XJ8C8F5"],
        vec!["dealscout", "run", "--search-term", "lamp", "--min", "1", "--max", "2"],
    ] {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        assert!(cli.command.expect("command").needs_config(), "{args:?}");
    }
}

#[test]
fn help_is_handled_by_the_parser() {
    let err = Cli::try_parse_from(["dealscout", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["dealscout"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
