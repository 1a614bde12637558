use super::*;

#[test]
fn parses_search_with_negative_longitude() {
    let cli = Cli::try_parse_from([
        "ethnica", "search", "--lng", "-74.006", "--lat", "40.7128", "--query", "halal",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Search {
            lng,
            lat,
            query,
            radius,
            attributes,
            category,
        } => {
            assert_eq!(lng, Some(-74.006));
            assert_eq!(lat, Some(40.7128));
            assert_eq!(query.as_deref(), Some("halal"));
            assert_eq!(radius, None);
            assert!(attributes.is_empty());
            assert_eq!(category, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn search_without_location_parses() {
    let cli = Cli::try_parse_from(["ethnica", "search"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Search {
            lng: None,
            lat: None,
            query: None,
            radius: None,
            ref attributes,
            category: None,
        } if attributes.is_empty()
    ));
}

#[test]
fn parses_attribute_and_category_filters() {
    let cli = Cli::try_parse_from([
        "ethnica",
        "search",
        "--attribute",
        "Woman Owned,Halal Options",
        "--attribute",
        "Organic",
        "--category",
        "Restaurant",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Search {
            attributes,
            category,
            ..
        } => {
            assert_eq!(attributes, vec!["Woman Owned", "Halal Options", "Organic"]);
            assert_eq!(category.as_deref(), Some("Restaurant"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn search_with_only_longitude_is_rejected() {
    assert!(Cli::try_parse_from(["ethnica", "search", "--lng", "-74.0"]).is_err());
}

#[test]
fn parses_details_command() {
    let cli = Cli::try_parse_from(["ethnica", "details", "mapbox-poi.123"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Details { ref id } if id == "mapbox-poi.123"));
}

#[test]
fn parses_location_subcommands() {
    let cli = Cli::try_parse_from(["ethnica", "location", "show"]).expect("show");
    assert!(matches!(
        cli.command,
        Commands::Location {
            command: LocationCommands::Show
        }
    ));

    let cli = Cli::try_parse_from(["ethnica", "location", "set", "--lng", "-0.1276", "--lat", "51.5072"])
        .expect("set");
    assert!(matches!(
        cli.command,
        Commands::Location {
            command: LocationCommands::Set { .. }
        }
    ));

    let cli = Cli::try_parse_from(["ethnica", "location", "clear"]).expect("clear");
    assert!(matches!(
        cli.command,
        Commands::Location {
            command: LocationCommands::Clear
        }
    ));
}

#[test]
fn coordinate_rejects_out_of_range() {
    assert!(coordinate(Some(200.0), Some(10.0)).is_err());
    assert!(coordinate(Some(10.0), Some(-91.0)).is_err());
    assert_eq!(
        coordinate(Some(-74.006), Some(40.7128)).expect("valid"),
        Some(LngLat::new(-74.006, 40.7128))
    );
    assert_eq!(coordinate(None, None).expect("absent"), None);
}

#[test]
fn log_filter_falls_back_to_configured_level() {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    let filter = log_filter("ethnica_places=debug").expect("valid directive");
    assert_eq!(filter.to_string(), "ethnica_places=debug");
    assert!(log_filter("ethnica=notalevel").is_err());
}

mod center {
    use ethnica_core::{AppConfig, LngLat, LocationCache};

    use crate::search::{choose_center, DEFAULT_CENTER_NOTICE};

    fn config_with_cache(dir: &tempfile::TempDir) -> AppConfig {
        let mut config = ethnica_core::load_app_config_from_env().expect("config");
        config.location_cache_path = dir.path().join("location.json");
        config.default_center = LngLat::new(-74.006, 40.7128);
        config
    }

    #[test]
    fn default_center_adds_notice() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_with_cache(&dir);
        let (center, notice) = choose_center(&config, None);
        assert_eq!(center, config.default_center);
        assert_eq!(notice.map(|n| n.message), Some(DEFAULT_CENTER_NOTICE.to_string()));
    }

    #[test]
    fn explicit_center_is_remembered_for_next_search() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_with_cache(&dir);
        let london = LngLat::new(-0.1276, 51.5072);

        let (center, notice) = choose_center(&config, Some(london));
        assert_eq!(center, london);
        assert!(notice.is_none());

        let (center, notice) = choose_center(&config, None);
        assert_eq!(center, london);
        assert!(notice.is_none());
        assert!(LocationCache::new(&config.location_cache_path)
            .entry()
            .is_some());
    }
}
