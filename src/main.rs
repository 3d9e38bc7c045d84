use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitpulse::models::ActivityReport;
use gitpulse::{AnalysisConfig, AnalysisPipeline, Config, GitHubClient};

#[derive(Parser, Debug)]
#[command(name = "gitpulse")]
#[command(version = "0.1.0")]
#[command(about = "Analyze GitHub activity patterns and generate insights")]
struct Args {
    /// GitHub username to analyze
    #[arg(short, long)]
    username: String,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Lookback window in days
    #[arg(long)]
    lookback_days: Option<u32>,

    /// Maximum number of events to analyze
    #[arg(long)]
    max_events: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitpulse=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    let mut analysis_config = AnalysisConfig::from(&config);
    if let Some(days) = args.lookback_days {
        analysis_config.lookback_days = days;
    }
    if let Some(max) = args.max_events {
        analysis_config.max_events = max;
    }

    let github = GitHubClient::new(&config.github_token, analysis_config.max_events)?;
    let pipeline = AnalysisPipeline::new(github, analysis_config)?;

    tracing::info!("Starting analysis for GitHub user: {}", args.username);
    let report = pipeline.analyze_user(&args.username).await?;

    output_report(&report, &args)?;

    Ok(())
}

fn output_report(report: &ActivityReport, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(report)?,
        "markdown" => format_markdown(report),
        _ => format_text(report),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(report: &ActivityReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== Activity Analysis: {} ===\n\n",
        report.profile.login
    ));

    if let Some(ref name) = report.profile.name {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(ref bio) = report.profile.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    output.push_str(&format!(
        "Public repos: {} | Followers: {} | Following: {}\n\n",
        report.profile.public_repos, report.profile.followers, report.profile.following
    ));

    output.push_str(&format!("{}\n\n", report.summary));

    let productivity = &report.patterns.productivity;
    output.push_str("Activity:\n");
    output.push_str(&format!("  Events analyzed: {}\n", productivity.total_events));
    output.push_str(&format!("  Active days: {}\n", productivity.active_days));
    output.push_str(&format!(
        "  Daily average: {:.2} events\n",
        productivity.daily_average_events
    ));
    output.push_str(&format!(
        "  Commits: {} ({:.2}/day)\n",
        productivity.total_commits, productivity.commits_per_day
    ));

    if !report.patterns.activity.top_event_types.is_empty() {
        output.push_str("\nTop activity types:\n");
        for entry in &report.patterns.activity.top_event_types {
            output.push_str(&format!("  {}: {}\n", entry.kind, entry.count));
        }
    }

    output.push_str("\nLabels:\n");
    output.push_str(&format!("  Expertise: {}\n", report.labels.expertise));
    output.push_str(&format!(
        "  Collaboration style: {}\n",
        report.labels.collaboration_style
    ));
    output.push_str(&format!(
        "  Likely next activity: {}\n",
        report.labels.predicted_next_event
    ));
    output.push_str(&format!(
        "  Productivity trend: {}\n",
        report.labels.productivity_trend
    ));
    if !report.labels.specializations.is_empty() {
        output.push_str(&format!(
            "  Specializations: {}\n",
            report.labels.specializations.join(", ")
        ));
    }

    if !report.insights.is_empty() {
        output.push_str("\nInsights:\n");
        for insight in &report.insights {
            output.push_str(&format!("  - {}\n", insight));
        }
    }

    if !report.recommendations.is_empty() {
        output.push_str("\nRecommendations:\n");
        for recommendation in &report.recommendations {
            output.push_str(&format!("  * {}\n", recommendation));
        }
    }

    output.push_str(&format!(
        "\nAnalyzed on: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_markdown(report: &ActivityReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Activity Analysis: {}\n\n", report.profile.login));

    if let Some(ref name) = report.profile.name {
        output.push_str(&format!("**Name:** {}\n\n", name));
    }
    if let Some(ref bio) = report.profile.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str(&format!("{}\n\n", report.summary));

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!(
        "| Events Analyzed | {} |\n",
        report.patterns.productivity.total_events
    ));
    output.push_str(&format!(
        "| Active Days | {} |\n",
        report.patterns.productivity.active_days
    ));
    output.push_str(&format!(
        "| Commits | {} |\n",
        report.patterns.productivity.total_commits
    ));
    output.push_str(&format!("| Expertise | {} |\n", report.labels.expertise));
    output.push_str(&format!(
        "| Collaboration Style | {} |\n",
        report.labels.collaboration_style
    ));
    output.push_str(&format!(
        "| Productivity Trend | {} |\n",
        report.labels.productivity_trend
    ));
    if !report.labels.specializations.is_empty() {
        output.push_str(&format!(
            "| Specializations | {} |\n",
            report.labels.specializations.join(", ")
        ));
    }

    if !report.patterns.time.peak_hours.is_empty() {
        output.push_str("\n## Peak Hours\n\n");
        output.push_str("| Hour (UTC) | Events |\n|------------|--------|\n");
        for peak in &report.patterns.time.peak_hours {
            output.push_str(&format!("| {}:00 | {} |\n", peak.hour, peak.count));
        }
    }

    if !report.insights.is_empty() {
        output.push_str("\n## Insights\n\n");
        for insight in &report.insights {
            output.push_str(&format!("- {}\n", insight));
        }
    }

    if !report.recommendations.is_empty() {
        output.push_str("\n## Recommendations\n\n");
        for recommendation in &report.recommendations {
            output.push_str(&format!("- {}\n", recommendation));
        }
    }

    output.push_str(&format!(
        "\n---\n*Analyzed on {}*\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
