use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "job-board", version, about = "Remote job board backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Apply pending migrations, then start the HTTP server
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

impl Cli {
    /// The requested command; no subcommand means `serve`
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["job-board"]).unwrap();
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn migrate_subcommand() {
        let cli = Cli::try_parse_from(["job-board", "migrate"]).unwrap();
        assert_eq!(cli.command(), Command::Migrate);
        assert!(Cli::try_parse_from(["job-board", "seed"]).is_err());
    }
}
