//! Database table structure dump tool.
//!
//! This binary connects to a MySQL server, reads the catalog for the
//! requested databases and tables, and writes it out in one of the
//! registered formats.
//!
//! # Security Guarantees
//! - Read-only catalog queries only
//! - Passwords are prompted for without echo and never logged
//! - Nothing but the rendered document is written to stdout

mod output;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tsdump_core::repository::config::DEFAULT_PORT;
use tsdump_core::{
    ConnectionConfig, Credentials, DEFAULT_RENDERER, Database, MySqlRepository, Renderer,
    RendererRegistry, TsdumpError, assemble, init_logging, sort_databases,
};

/// CLI argument structure
#[derive(Debug, Parser)]
#[command(name = "tsdump")]
#[command(about = "Database table structure dump tool")]
#[command(version)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(long_about = "
tsdump - Database table structure dump tool

Dumps the structure of every database, one database, or selected tables
of one database. Only information_schema is read.

EXAMPLES:
  tsdump -u root -p secret
  tsdump -V md -o shop.md shop
  tsdump -V json -s shop users orders
")]
struct Cli {
    /// Enable debug mode
    #[arg(short = 'D', long)]
    debug: bool,

    /// Connect to host
    #[arg(short = 'h', long, default_value = "127.0.0.1", env = "TSDUMP_HOST")]
    host: String,

    /// Port number to use for connection
    #[arg(short = 'P', long, default_value_t = DEFAULT_PORT, env = "TSDUMP_PORT")]
    port: u16,

    /// The socket file to use for connection
    #[arg(short = 'S', long, value_name = "FILE")]
    socket: Option<PathBuf>,

    /// User for login if not current user
    #[arg(short = 'u', long, env = "TSDUMP_USER")]
    user: Option<String>,

    /// Password to use when connecting to server; prompted for when absent
    #[arg(short = 'p', long, env = "TSDUMP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Output viewer; the accepted names are filled in from the registry
    #[arg(short = 'V', long, default_value = DEFAULT_RENDERER)]
    viewer: String,

    /// Write to a file, instead of STDOUT
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Sort databases, tables and columns in ascending order by name
    #[arg(short = 's', long)]
    sorted: bool,

    /// Database to dump; every database when omitted
    #[arg(value_name = "DATABASE")]
    database: Option<String>,

    /// Tables of DATABASE to dump, in the order given
    #[arg(value_name = "TABLE")]
    tables: Vec<String>,
}

/// Parses `args`, listing the registered viewer names in the help text.
///
/// Help and version are attached here as long-only flags because their
/// usual short forms belong to `--host` and `--viewer`.
fn parse_cli<I, T>(registry: &RendererRegistry, args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let viewer_help = format!(
        "Output viewer. Optional values: {}",
        registry.names().join("|")
    );
    let matches = Cli::command()
        .arg(
            Arg::new("help")
                .long("help")
                .action(ArgAction::Help)
                .help("Print help"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .action(ArgAction::Version)
                .help("Print version"),
        )
        .mut_arg("viewer", |arg| arg.help(viewer_help))
        .try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let registry = RendererRegistry::with_builtin();
    let cli = match parse_cli(&registry, std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("[tsdump] {}", usage_error_line(&e));
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &registry).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[tsdump] {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// First line of a clap usage error, without its `error: ` prefix.
fn usage_error_line(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

/// Runs one dump: resolve the viewer, read the catalog, render.
async fn run(cli: Cli, registry: &RendererRegistry) -> Result<()> {
    init_logging(cli.debug)?;

    // Fail on a bad viewer name before touching the network
    let renderer = registry
        .resolve(&cli.viewer)
        .ok_or_else(|| TsdumpError::unsupported_viewer(&cli.viewer, &registry.names()))?;

    let credentials = credentials(cli.user, cli.password)?;
    let mut config = ConnectionConfig::new(cli.host).with_port(cli.port);
    if let Some(socket) = cli.socket {
        config = config.with_socket(socket);
    }

    tracing::debug!("Connecting to {} as '{}'", config, credentials.username());
    let repo = MySqlRepository::connect(config, &credentials)?;
    repo.test_connection().await?;

    let db_name = cli.database.unwrap_or_default();
    let assembled = assemble(&repo, &db_name, &cli.tables).await;
    repo.close().await;
    let databases = assembled?;

    tracing::debug!("Assembled {} database(s)", databases.len());

    emit(databases, cli.sorted, renderer, cli.output.as_deref())
}

/// Sorts the assembled tree when asked to, then renders it to the destination.
fn emit(
    mut databases: Vec<Database>,
    sorted: bool,
    renderer: &dyn Renderer,
    output: Option<&Path>,
) -> Result<()> {
    if sorted {
        sort_databases(&mut databases);
    }

    output::write_output(renderer, &databases, output)?;
    Ok(())
}

/// Resolves the login user and password, prompting for an absent password.
fn credentials(user: Option<String>, password: Option<String>) -> Result<Credentials> {
    let user = user.unwrap_or_else(whoami::username);
    let password = match password.filter(|p| !p.is_empty()) {
        Some(password) => password,
        None => rpassword::prompt_password("Enter Password: ")?,
    };

    Ok(Credentials::new(user, Some(password).filter(|p| !p.is_empty())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tsdump_core::Table;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let registry = RendererRegistry::with_builtin();
        parse_cli(&registry, std::iter::once("tsdump").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).unwrap();

        assert!(!cli.debug);
        assert_eq!(cli.port, DEFAULT_PORT);
        assert_eq!(cli.viewer, DEFAULT_RENDERER);
        assert!(!cli.sorted);
        assert_eq!(cli.database, None);
        assert!(cli.tables.is_empty());
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&[
            "-D", "-h", "db.internal", "-P", "3307", "-u", "reader", "-p", "secret", "-V",
            "json", "-o", "out.json", "-s",
        ])
        .unwrap();

        assert!(cli.debug);
        assert_eq!(cli.host, "db.internal");
        assert_eq!(cli.port, 3307);
        assert_eq!(cli.user.as_deref(), Some("reader"));
        assert_eq!(cli.password.as_deref(), Some("secret"));
        assert_eq!(cli.viewer, "json");
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert!(cli.sorted);
    }

    #[test]
    fn test_positional_database_and_tables() {
        let cli = parse(&["shop", "orders", "users"]).unwrap();

        assert_eq!(cli.database.as_deref(), Some("shop"));
        assert_eq!(cli.tables, vec!["orders".to_string(), "users".to_string()]);
    }

    #[test]
    fn test_socket_flag() {
        let cli = parse(&["-S", "/var/run/mysqld/mysqld.sock"]).unwrap();
        assert_eq!(
            cli.socket,
            Some(PathBuf::from("/var/run/mysqld/mysqld.sock"))
        );
    }

    #[test]
    fn test_help_lists_registered_viewers() {
        let error = parse(&["--help"]).unwrap_err();

        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(
            error
                .to_string()
                .contains("Optional values: csv|json|md|txt|xlsx|yaml")
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(parse(&["-P", "not-a-port"]).is_err());
        assert!(parse(&["-P", "70000"]).is_err());
    }

    #[test]
    fn test_credentials_use_given_password() {
        let credentials =
            credentials(Some("reader".to_string()), Some("secret".to_string())).unwrap();

        assert_eq!(credentials.username(), "reader");
        assert_eq!(credentials.password(), Some("secret"));
    }

    #[tokio::test]
    async fn test_unsupported_viewer_fails_before_connecting() {
        let registry = RendererRegistry::with_builtin();
        let cli = parse(&["-V", "html", "-P", "9", "-p", "x"]).unwrap();

        let error = run(cli, &registry).await.unwrap_err();

        assert_eq!(
            error.to_string(),
            r#"unsupported viewer: "html" (valid: csv|json|md|txt|xlsx|yaml)"#
        );
    }

    fn unsorted_tree() -> Vec<Database> {
        vec![
            Database::new("shop")
                .with_table(Table::new("shop", "users"))
                .with_table(Table::new("shop", "orders")),
            Database::new("analytics"),
        ]
    }

    fn emit_to_file(sorted: bool) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let registry = RendererRegistry::with_builtin();

        emit(
            unsorted_tree(),
            sorted,
            registry.resolve(DEFAULT_RENDERER).unwrap(),
            Some(&path),
        )
        .unwrap();
        std::fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn test_emit_sorted_orders_tree() {
        let output = emit_to_file(true);

        let analytics = output.find("Database: analytics").unwrap();
        let shop = output.find("Database: shop").unwrap();
        assert!(analytics < shop);
        assert!(output.find("Table: orders").unwrap() < output.find("Table: users").unwrap());
    }

    #[test]
    fn test_emit_unsorted_keeps_assembled_order() {
        let output = emit_to_file(false);

        let analytics = output.find("Database: analytics").unwrap();
        let shop = output.find("Database: shop").unwrap();
        assert!(shop < analytics);
        assert!(output.find("Table: users").unwrap() < output.find("Table: orders").unwrap());
    }

    #[test]
    fn test_usage_error_is_one_line() {
        let error = parse(&["-P", "not-a-port"]).unwrap_err();
        let line = usage_error_line(&error);

        assert_eq!(error.kind(), ErrorKind::ValueValidation);
        assert!(line.starts_with("invalid value 'not-a-port'"), "{line}");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let error = parse(&["--no-such-flag"]).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::UnknownArgument);
        assert!(usage_error_line(&error).starts_with("unexpected argument '--no-such-flag'"));
    }
}
