use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["shopscope", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["shopscope", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["shopscope"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn extract_defaults_to_cached_persistent_run() {
    let cli = Cli::try_parse_from(["shopscope", "extract", "shop.example"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Extract {
            ref url,
            refresh: false,
            dry_run: false
        }) if url == "shop.example"
    ));
}

#[test]
fn extract_accepts_refresh_and_dry_run() {
    let cli = Cli::try_parse_from([
        "shopscope",
        "extract",
        "https://shop.example",
        "--refresh",
        "--dry-run",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Extract {
            refresh: true,
            dry_run: true,
            ..
        })
    ));
}

#[test]
fn extract_requires_a_url() {
    assert!(Cli::try_parse_from(["shopscope", "extract"]).is_err());
}

#[test]
fn parses_show_command() {
    let cli = Cli::try_parse_from(["shopscope", "show", "shop.example"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Show { ref url }) if url == "shop.example"
    ));
}

#[test]
fn help_is_answered_by_the_parser_alone() {
    let err = Cli::try_parse_from(["shopscope", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

    let err = Cli::try_parse_from(["shopscope", "extract", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["shopscope", "collect"]).is_err());
}

#[test]
fn build_extractor_accepts_default_config() {
    let config = shopscope_core::AppConfig {
        database_url: None,
        env: shopscope_core::Environment::Test,
        log_level: "info".to_string(),
        db_max_connections: 10,
        db_min_connections: 1,
        db_acquire_timeout_secs: 10,
        scraper_request_timeout_secs: 15,
        scraper_connect_timeout_secs: 10,
        scraper_user_agent: "shopscope-test/0.1".to_string(),
        catalog_max_pages: 2,
    };

    let extractor = store::build_extractor(&config).expect("extractor should build");
    assert_eq!(extractor.rules().catalog_page_size, 250);
}
