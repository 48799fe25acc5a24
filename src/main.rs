use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use relnotes::models::{DateRange, RepoRef};
use relnotes::{
    ClaudeProvider, Config, Error, GitHubClient, PipelineOptions, ReleaseNotesPipeline,
};

#[derive(Parser, Debug)]
#[command(name = "relnotes")]
#[command(version = "0.1.0")]
#[command(about = "Generate user-friendly release notes from closed GitHub issues")]
struct Args {
    /// Repository owner (user or organization)
    owner: String,

    /// Repository name
    repo: String,

    /// Start of the closed-date range (YYYY-MM-DD, inclusive)
    start_date: String,

    /// End of the closed-date range (YYYY-MM-DD, inclusive)
    end_date: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Skip the editor review pass
    #[arg(long)]
    no_editor: bool,

    /// Claude model to use
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("relnotes=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();
    let repo = RepoRef::new(&args.owner, &args.repo);
    let range = parse_range(&args.start_date, &args.end_date)?;

    // Load configuration
    let config = Config::from_env()?;

    // Initialize clients
    let github = GitHubClient::new(&config.github_token)?;
    let llm = ClaudeProvider::new(
        config.anthropic_api_key.clone(),
        args.model.clone().or_else(|| config.model.clone()),
    );

    let options = PipelineOptions {
        editor_enabled: !args.no_editor,
    };
    let pipeline = ReleaseNotesPipeline::new(github, llm, options);

    // Run the pipeline
    tracing::info!("Generating release notes for {} ({})", repo, range);
    let document = pipeline.generate(&repo, &range).await?;

    // Write the document
    if let Some(ref path) = args.output {
        std::fs::write(path, &document)?;
        tracing::info!("Release notes written to: {}", path);
    } else {
        println!("{}", document);
    }

    Ok(())
}

fn parse_range(start: &str, end: &str) -> Result<DateRange, Error> {
    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;
    if start_date > end_date {
        return Err(Error::Config(format!(
            "start date {} is after end date {}",
            start_date, end_date
        )));
    }
    Ok(DateRange::new(start_date, end_date))
}

fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("invalid date '{}', expected YYYY-MM-DD", value)))
}
