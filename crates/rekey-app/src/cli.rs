#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via the `REKEY_*` prefix.

use std::env;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
rekey — terminal password-change form

USAGE:
    rekey [OPTIONS]

OPTIONS:
    --ascii              Use ASCII characters for mask and strength bar
    --no-alt-screen      Render on the main screen instead of the alternate buffer
    --log-file=PATH      Append structured logs to PATH (off by default)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Tab / Shift-Tab / Up / Down   Move between fields and buttons
    Enter                         Submit (Cancel button: cancel)
    Space                         Activate the focused button
    Esc                           Cancel

ENVIRONMENT VARIABLES:
    REKEY_ASCII           Set to any value to force --ascii
    REKEY_NO_ALT_SCREEN   Set to any value to force --no-alt-screen
    REKEY_LOG_FILE        Override --log-file
    REKEY_LOG             Log filter directives (e.g. 'debug', 'rekey=trace')";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Use ASCII mask and bar characters.
    pub ascii: bool,
    /// Use the alternate screen buffer.
    pub alt_screen: bool,
    /// Log destination (None = logging disabled).
    pub log_file: Option<String>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            ascii: false,
            alt_screen: true,
            log_file: None,
        }
    }
}

/// Result of parsing the argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Run with these options.
    Run(Opts),
    /// Print help and exit.
    Help,
    /// Print the version and exit.
    Version,
}

/// Parse the given arguments (without the program name).
///
/// # Errors
///
/// Returns a message naming the offending argument.
pub fn parse_from<I>(args: I) -> Result<Outcome, String>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = Opts::default();

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Outcome::Help),
            "--version" | "-V" => return Ok(Outcome::Version),
            "--ascii" => opts.ascii = true,
            "--no-alt-screen" => opts.alt_screen = false,
            _ => {
                if let Some(path) = arg.strip_prefix("--log-file=") {
                    opts.log_file = Some(path.to_string());
                } else {
                    return Err(format!("unknown argument: {arg}"));
                }
            }
        }
    }

    apply_env_overrides(&mut opts);
    Ok(Outcome::Run(opts))
}

fn apply_env_overrides(opts: &mut Opts) {
    if env::var_os("REKEY_ASCII").is_some() {
        opts.ascii = true;
    }
    if env::var_os("REKEY_NO_ALT_SCREEN").is_some() {
        opts.alt_screen = false;
    }
    if let Ok(path) = env::var("REKEY_LOG_FILE")
        && !path.is_empty()
    {
        opts.log_file = Some(path);
    }
}

/// The help text printed for `--help`.
pub fn help_text() -> &'static str {
    HELP_TEXT
}

/// The version printed for `--version`.
pub fn version() -> &'static str {
    VERSION
}
