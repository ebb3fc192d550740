use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ecodeck")]
#[command(author, version, about)]
#[command(long_about = "An AI-generated slideshow on green chemistry and energy efficiency.\n\n\
    Every launch asks Gemini for a fresh ten-slide presentation and presents it.\n\n\
    Examples:\n  \
    ecodeck                      Generate and present (fullscreen)\n  \
    ecodeck --windowed           Present in a window\n  \
    ecodeck generate -o deck.json  Generate slides without opening a window\n  \
    ecodeck config init          Store your Gemini API key")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a presentation and write it as JSON
    Generate {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the request body sent to the generation service
    Prompt,

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Interactively set the API key and model
    Init,

    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. gemini.model, images.host, defaults.windowed)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Generate { output }) => {
                crate::commands::generate::run(output.as_deref(), self.quiet)
            }
            Some(Commands::Prompt) => crate::commands::prompt::run(),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("ecodeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => crate::app::run(self.windowed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_launches_viewer() {
        let cli = Cli::try_parse_from(["ecodeck", "--windowed", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.windowed);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_generate_output_flag() {
        let cli = Cli::try_parse_from(["ecodeck", "generate", "-o", "deck.json"]).unwrap();
        match cli.command {
            Some(Commands::Generate { output }) => {
                assert_eq!(output, Some(PathBuf::from("deck.json")));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_config_set_parses() {
        let cli =
            Cli::try_parse_from(["ecodeck", "config", "set", "gemini.model", "gemini-2.5-pro"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Set { .. }
            })
        ));
    }
}
