//! Command-line argument parsing for Suraksha
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::bootstrap::NavigationContext;
use crate::cli::config::Config;

/// Suraksha OS - your terminal guide to staying safe online in Nepal
#[derive(Parser, Debug)]
#[command(name = "suraksha")]
#[command(version)]
#[command(about = "Terminal guide through cyber-safety awareness modules", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the progress record
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Module just completed, as reported by a module page
    #[arg(long, value_name = "MODULE")]
    pub achieved: Option<String>,

    /// Navigation context as a query string, e.g. "achieved=quiz"
    #[arg(long, value_name = "QUERY")]
    pub context: Option<String>,

    /// Verbosity level: default (warnings), -v (debug), -vv (trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive terminal (default)
    Start,

    /// Interpret a single command and exit
    Run {
        /// Command to interpret, e.g. "help" or "panic"
        #[arg(value_name = "COMMAND", num_args = 0.., trailing_var_arg = true)]
        input: Vec<String>,
    },

    /// Show the current safety shield and completed modules
    Status,

    /// Run health checks on configuration, storage and module pages
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Subcommand to run, defaulting to the interactive terminal
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Start)
    }

    /// Navigation context from `--achieved` and `--context`
    ///
    /// `--achieved` wins when both name a module.
    pub fn navigation_context(&self) -> NavigationContext {
        let base = match &self.achieved {
            Some(module) => NavigationContext::with_achieved(module.clone()),
            None => NavigationContext::empty(),
        };

        match &self.context {
            Some(query) => base.merge(NavigationContext::from_query(query)),
            None => base,
        }
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.state_dir {
            config.storage.state_dir = dir.to_string_lossy().into_owned();
        }
        if self.no_color {
            config.display.color = false;
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Default tracing filter for this level
    pub fn log_directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "suraksha=error",
            Verbosity::Normal => "suraksha=warn",
            Verbosity::Verbose => "suraksha=debug",
            Verbosity::VeryVerbose => "suraksha=trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_command_is_start() {
        let args = parse(&["suraksha"]);
        assert_eq!(args.command(), Commands::Start);
        assert_eq!(args.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["suraksha", "-q"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["suraksha", "-v"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["suraksha", "-vv"]).verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_run_collects_words() {
        let args = parse(&["suraksha", "run", "learn", "now"]);
        assert_eq!(
            args.command(),
            Commands::Run {
                input: vec!["learn".to_string(), "now".to_string()]
            }
        );
    }

    #[test]
    fn test_navigation_context_from_flags() {
        let args = parse(&["suraksha", "--achieved", "quiz"]);
        assert_eq!(args.navigation_context().achieved(), Some("quiz"));

        let args = parse(&["suraksha", "--context", "?achieved=scan"]);
        assert_eq!(args.navigation_context().achieved(), Some("scan"));

        let args = parse(&["suraksha", "--achieved", "learn", "--context", "achieved=scan"]);
        assert_eq!(args.navigation_context().achieved(), Some("learn"));

        let args = parse(&["suraksha"]);
        assert_eq!(args.navigation_context().achieved(), None);
    }

    #[test]
    fn test_overrides() {
        let args = parse(&["suraksha", "--state-dir", "/tmp/suraksha-test", "--no-color"]);
        let mut config = Config::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.storage.state_dir, "/tmp/suraksha-test");
        assert_eq!(config.history_path(), PathBuf::from("/tmp/suraksha-test/history"));
        assert!(!config.display.color);
    }

    #[test]
    fn test_log_directives() {
        assert_eq!(Verbosity::Normal.log_directive(), "suraksha=warn");
        assert_eq!(Verbosity::VeryVerbose.log_directive(), "suraksha=trace");
        assert_eq!(Verbosity::Quiet.as_str(), "quiet");
    }
}
