//! Command-line interface.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::net::IpAddr;
use std::path::PathBuf;

/// Command-line arguments.
///
/// Every option is optional; unset options fall through to the
/// environment, the config file, and finally the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Host address to bind to.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Path to the paste store log file.
    pub store_path: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('H') | Long("host") => {
                let value: String = parser.value()?.parse()?;
                result.host = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("host", value))?,
                );
            }
            Short('p') | Long("port") => {
                let value: String = parser.value()?.parse()?;
                result.port = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("port", value))?,
                );
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('s') | Long("store-path") => {
                result.store_path = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"termpaste {version}
Menu-driven pastebin served over remote terminal sessions

USAGE:
    termpaste [OPTIONS]

OPTIONS:
    -H, --host <ADDR>        Host address to bind [default: 127.0.0.1]
    -p, --port <PORT>        Port to listen on [default: 2222]
    -c, --config <FILE>      Path to JSON configuration file
    -s, --store-path <FILE>  Path to the paste store log [default: termpaste-pastes.jsonl]
    -l, --log-level <LEVEL>  Log level: error, warn, info, debug, trace
    -V, --version            Print version and exit
    -h, --help               Print this help and exit

Configuration priority: CLI arguments > environment variables
(TERMPASTE_HOST, TERMPASTE_PORT, TERMPASTE_STORE_PATH,
TERMPASTE_LOG_LEVEL) > config file > defaults."#
    );
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Underlying parser error.
    Parse(lexopt::Error),
    /// A flag value failed validation.
    InvalidValue(&'static str, String),
    /// A positional argument was given; none are accepted.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{}", e),
            Self::InvalidValue(flag, value) => write!(f, "invalid {}: {:?}", flag, value),
            Self::UnexpectedArgument(arg) => write!(f, "unexpected argument: {:?}", arg),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        parse_args_from(
            std::iter::once(OsString::from("termpaste"))
                .chain(args.iter().map(OsString::from)),
        )
    }

    #[test]
    fn test_no_args() {
        let args = parse(&[]).unwrap();
        assert!(args.host.is_none());
        assert!(args.port.is_none());
        assert!(!args.help);
        assert!(!args.version);
    }

    #[test]
    fn test_host_and_port() {
        let args = parse(&["--host", "0.0.0.0", "--port", "9999"]).unwrap();
        assert_eq!(args.host, Some("0.0.0.0".parse().unwrap()));
        assert_eq!(args.port, Some(9999));
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&["-H", "127.0.0.1", "-p", "2300", "-l", "debug"]).unwrap();
        assert_eq!(args.host, Some("127.0.0.1".parse().unwrap()));
        assert_eq!(args.port, Some(2300));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_store_path() {
        let args = parse(&["--store-path", "/tmp/pastes.jsonl"]).unwrap();
        assert_eq!(args.store_path, Some(PathBuf::from("/tmp/pastes.jsonl")));
    }

    #[test]
    fn test_invalid_host() {
        assert!(matches!(
            parse(&["--host", "not-an-ip"]),
            Err(ArgsError::InvalidValue("host", _))
        ));
    }

    #[test]
    fn test_invalid_port() {
        assert!(matches!(
            parse(&["--port", "70000"]),
            Err(ArgsError::InvalidValue("port", _))
        ));
    }

    #[test]
    fn test_unexpected_positional() {
        assert!(matches!(
            parse(&["stray"]),
            Err(ArgsError::UnexpectedArgument(_))
        ));
    }

    #[test]
    fn test_help_and_version() {
        assert!(parse(&["--help"]).unwrap().help);
        assert!(parse(&["-V"]).unwrap().version);
    }
}
