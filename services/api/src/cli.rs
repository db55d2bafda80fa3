use crate::demo::{run_demo, run_score, DemoArgs, ScoreArgs};
use crate::server;
use case_review::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Case Review",
    about = "Score highlight cases through the UQC and CQC review gates",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a saved draft offline and print the submission payload
    Score(ScoreArgs),
    /// Walk a sample review from UQC to submission
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_review::review::Category;
    use std::path::PathBuf;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["case-review-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_requires_an_answers_file() {
        assert!(Cli::try_parse_from(["case-review-api", "score"]).is_err());

        let cli = Cli::try_parse_from(["case-review-api", "score", "--answers", "draft.json"])
            .expect("parses");
        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.answers, PathBuf::from("draft.json"));
                assert!(args.case.is_none());
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn demo_parses_category_labels() {
        let cli = Cli::try_parse_from([
            "case-review-api",
            "demo",
            "--category",
            "random chatting",
            "--ansa",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Demo(args)) => {
                assert_eq!(args.category, Category::RandomChatting);
                assert!(args.ansa);
            }
            other => panic!("expected demo command, got {other:?}"),
        }

        let unknown = Cli::try_parse_from(["case-review-api", "demo", "--category", "cooking"]);
        assert!(unknown.is_err());
    }
}
