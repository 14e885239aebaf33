#[cfg(test)]
mod tests {
    use crate::cmd::Commands;
    use crate::Opts;
    use clap::Parser;

    fn parse(args: &[&str]) -> Opts {
        let mut full = vec!["zmon"];
        full.extend_from_slice(args);
        Opts::parse_from(full)
    }

    fn try_parse(args: &[&str]) -> Result<Opts, clap::Error> {
        let mut full = vec!["zmon"];
        full.extend_from_slice(args);
        Opts::try_parse_from(full)
    }

    #[test]
    fn parse_version() {
        let opts = parse(&["version"]);
        assert!(matches!(opts.cmd, Commands::Version));
    }

    #[test]
    fn parse_url_flag() {
        let opts = parse(&["--url", "https://zmon.example.org", "version"]);
        assert_eq!(opts.url.as_deref(), Some("https://zmon.example.org"));
    }

    #[test]
    fn parse_config_flag_after_subcommand() {
        let opts = parse(&["alert-definitions", "list", "--config", "/tmp/zmon.yaml"]);
        assert_eq!(opts.config.as_deref(), Some("/tmp/zmon.yaml"));
    }

    #[test]
    fn parse_verbose_count() {
        let opts = parse(&["-vv", "version"]);
        assert_eq!(opts.verbose, 2);
    }

    #[test]
    fn parse_alert_init() {
        let opts = parse(&["alert-definitions", "init", "alert.yaml"]);
        assert!(matches!(opts.cmd, Commands::AlertDefinitions(_)));
    }

    #[test]
    fn parse_alert_get_with_format() {
        let opts = parse(&["alert-definitions", "get", "42", "-o", "json", "--pretty"]);
        assert!(matches!(opts.cmd, Commands::AlertDefinitions(_)));
    }

    #[test]
    fn alert_get_requires_integer_id() {
        assert!(try_parse(&["alert-definitions", "get", "abc"]).is_err());
    }

    #[test]
    fn parse_alert_filter() {
        let opts = parse(&["alert-definitions", "filter", "team", "Platform", "--output", "yaml"]);
        assert!(matches!(opts.cmd, Commands::AlertDefinitions(_)));
    }

    #[test]
    fn filter_requires_field_and_value() {
        assert!(try_parse(&["alert-definitions", "filter", "team"]).is_err());
    }

    #[test]
    fn unknown_output_format_rejected() {
        assert!(try_parse(&["alert-definitions", "list", "-o", "xml"]).is_err());
    }

    #[test]
    fn parse_alert_create_update_delete() {
        for args in [
            &["alert-definitions", "create", "a.yaml"][..],
            &["alert-definitions", "update", "a.yaml"][..],
            &["alert-definitions", "delete", "7"][..],
        ] {
            assert!(matches!(parse(args).cmd, Commands::AlertDefinitions(_)));
        }
    }

    #[test]
    fn parse_dashboard_get() {
        let opts = parse(&["dashboard", "get", "3"]);
        assert!(matches!(opts.cmd, Commands::Dashboard(_)));
    }

    #[test]
    fn dashboard_update_requires_existing_file() {
        assert!(try_parse(&["dashboard", "update", "/nonexistent/dashboard.yaml"]).is_err());

        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert!(try_parse(&["dashboard", "update", path]).is_ok());
    }

    #[test]
    fn parse_config_commands() {
        for verb in ["init", "show", "path"] {
            assert!(matches!(parse(&["config", verb]).cmd, Commands::Config(_)));
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Opts::command().debug_assert();
    }
}
