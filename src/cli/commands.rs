//! CLI commands and argument parsing

use crate::resource::PROJECT_VARIABLE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Manage GitLab project CI/CD variables declaratively
#[derive(Parser, Debug)]
#[command(name = "gitlab-variable-provider")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// State file (JSON)
    #[arg(short, long, global = true, default_value = "gitlab-variables.state.json")]
    pub state: PathBuf,

    /// Provider configuration file (YAML or JSON); GITLAB_TOKEN and
    /// GITLAB_BASE_URL override its values
    #[arg(short = 'P', long, global = true)]
    pub provider_config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the schema of every resource type
    Schema,

    /// Show what apply would do
    Plan {
        /// Resource name in the state file
        name: String,

        /// Desired attributes (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Resource type
        #[arg(short = 't', long, default_value = PROJECT_VARIABLE)]
        resource_type: String,
    },

    /// Create, update or replace a resource to match the desired attributes
    Apply {
        /// Resource name in the state file
        name: String,

        /// Desired attributes (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Resource type
        #[arg(short = 't', long, default_value = PROJECT_VARIABLE)]
        resource_type: String,
    },

    /// Re-read a managed resource from GitLab
    Refresh {
        /// Resource name in the state file
        name: String,
    },

    /// Print a managed resource
    Show {
        /// Resource name in the state file
        name: String,

        /// Print sensitive values in clear text
        #[arg(long)]
        show_sensitive: bool,
    },

    /// Adopt an existing remote object into state
    Import {
        /// Resource name to record in the state file
        name: String,

        /// Remote identifier, `project:key` for project variables
        id: String,

        /// Resource type
        #[arg(short = 't', long, default_value = PROJECT_VARIABLE)]
        resource_type: String,
    },

    /// Delete a managed resource and drop it from state
    Destroy {
        /// Resource name in the state file
        name: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_apply() {
        let cli = Cli::parse_from([
            "gitlab-variable-provider",
            "--state",
            "s.json",
            "apply",
            "db_url",
            "--config",
            "db_url.yaml",
        ]);

        assert_eq!(cli.state, PathBuf::from("s.json"));
        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Apply {
                name,
                config,
                resource_type,
            } => {
                assert_eq!(name, "db_url");
                assert_eq!(config, PathBuf::from("db_url.yaml"));
                assert_eq!(resource_type, PROJECT_VARIABLE);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_import() {
        let cli = Cli::parse_from([
            "gitlab-variable-provider",
            "import",
            "db_url",
            "group/app:DB_URL",
            "-f",
            "json",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Import { ref id, .. } if id == "group/app:DB_URL"
        ));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
