use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};
use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghdash::chart::{to_svg, Drawing};
use ghdash::dashboard::Report;
use ghdash::export::{self, BackupKind};
use ghdash::format::{format_date, format_number, time_ago_millis};
use ghdash::state::{Action, ActivityFilter, ChartKind, SortKey, TimeWindow};
use ghdash::models::UserSuggestion;
use ghdash::storage::KeyValueStore;
use ghdash::{
    AnalysisPipeline, Config, Dashboard, GitHubClient, PipelineConfig, PreferenceStore, SqliteStore,
    UserSearchFilters,
};

#[derive(Parser, Debug)]
#[command(name = "ghdash")]
#[command(version = "0.1.0")]
#[command(about = "GitHub profile analytics: metrics, insights, charts and repository tables")]
struct Args {
    /// GitHub username to analyze
    #[arg(short, long)]
    username: Option<String>,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Repository sort key (stars, forks, updated, created)
    #[arg(long)]
    sort: Option<String>,

    /// Only list repositories whose name or description contains this
    #[arg(short, long)]
    query: Option<String>,

    /// Repository table page
    #[arg(long, default_value = "1")]
    page: usize,

    /// Activity filter (all, push, pr, issues)
    #[arg(long, default_value = "all")]
    activity: String,

    /// Language chart kind (pie, bar)
    #[arg(long)]
    chart: Option<String>,

    /// Activity window (7d, 30d, 90d)
    #[arg(long)]
    window: Option<String>,

    /// Chart theme (light, dark); saved for later runs
    #[arg(long)]
    theme: Option<String>,

    /// Write the language, trend, activity and heatmap charts as SVG here
    #[arg(long)]
    svg_dir: Option<PathBuf>,

    /// Write the full analysis JSON document into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Bookmark the analysed profile
    #[arg(long)]
    bookmark: bool,

    /// Remember sort, chart and window as defaults
    #[arg(long)]
    save_defaults: bool,

    /// List recent searches and exit
    #[arg(long)]
    history: bool,

    /// List bookmarked profiles and exit
    #[arg(long)]
    bookmarks: bool,

    /// Write a backup (history, bookmarks, settings, all) and exit
    #[arg(long)]
    backup: Option<String>,

    /// Database path for history, bookmarks and preferences
    #[arg(long)]
    database: Option<String>,

    /// Compare the analysed profile with these users (at most 3 profiles)
    #[arg(long)]
    compare: Vec<String>,

    /// Search users by location (used when no username is given)
    #[arg(long)]
    location: Option<String>,

    /// Search users by language
    #[arg(long)]
    language: Option<String>,

    /// Search users with more followers than this
    #[arg(long)]
    min_followers: Option<u32>,

    /// Search users with more repositories than this
    #[arg(long)]
    min_repos: Option<u32>,

    /// Search users by company
    #[arg(long)]
    company: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("ghdash=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    let database = args.database.clone().unwrap_or_else(|| config.database_path.clone());
    let store = PreferenceStore::load(SqliteStore::new(&database)?, config.history_limit)?;
    let mut dashboard = Dashboard::new(store, false);

    apply_selection(&mut dashboard, &args)?;

    if args.history {
        print_history(&dashboard);
        return Ok(());
    }
    if args.bookmarks {
        print_bookmarks(&dashboard);
        return Ok(());
    }
    if let Some(ref kind) = args.backup {
        let kind = BackupKind::parse(kind).ok_or_else(|| anyhow!("Unknown backup kind: {}", kind))?;
        let document = export::backup(dashboard.store(), kind, Utc::now());
        std::fs::write(kind.filename(), export::to_json(&document)?)?;
        tracing::info!("Backup written to: {}", kind.filename());
        return Ok(());
    }

    let github = GitHubClient::new(config.github_token.as_deref())?;
    let pipeline_config = PipelineConfig {
        show_progress: args.output.is_some() || args.format != "json",
        ..PipelineConfig::from(&config)
    };
    let pipeline = AnalysisPipeline::new(github, pipeline_config);

    let filters = search_filters(&args);
    let Some(username) = args.username.clone() else {
        if filters.is_empty() {
            bail!("--username is required unless --history, --bookmarks, --backup or a search filter is given");
        }
        let found = pipeline.search(&filters).await.map_err(|e| {
            eprintln!("{}", e.user_message());
            e
        })?;
        print_search_results(&filters, &found);
        return Ok(());
    };

    tracing::info!("Starting analysis for GitHub user: {}", username);
    let snapshot = match pipeline.load(&username).await {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => bail!("No profile loaded for {:?}", username),
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    let now = Utc::now();
    dashboard.load_snapshot(snapshot, now.timestamp_millis())?;

    if let Some(ref query) = args.query {
        dashboard.filter_repositories(query);
    }
    if args.page > 1 && dashboard.go_to_page(args.page).is_empty() {
        tracing::warn!("Page {} is out of range, showing page 1", args.page);
    }

    if args.bookmark {
        if let Some(outcome) = dashboard.bookmark_current(now.timestamp_millis())? {
            tracing::info!("{}", outcome.notice());
        }
    }
    if args.save_defaults {
        dashboard.save_selection_as_default()?;
    }

    if !args.compare.is_empty() {
        compare_profiles(&mut dashboard, &pipeline, &args.compare).await;
    }

    if let Some(ref dir) = args.svg_dir {
        write_charts(&dashboard, dir)?;
    }

    if let Some(ref dir) = args.export_dir {
        if let Some(document) = dashboard.export(now) {
            let path = dir.join(export::profile_export_filename(&document.user.login));
            std::fs::create_dir_all(dir)?;
            std::fs::write(&path, export::to_json(&document)?)?;
            tracing::info!("Analysis exported to: {}", path.display());
        }
    }

    let report = dashboard
        .report(now)
        .ok_or_else(|| anyhow!("No profile loaded"))?;
    output_report(&report, &args)?;

    Ok(())
}

fn search_filters(args: &Args) -> UserSearchFilters {
    UserSearchFilters {
        location: args.location.clone(),
        language: args.language.clone(),
        min_followers: args.min_followers,
        min_repos: args.min_repos,
        company: args.company.clone(),
    }
}

fn print_search_results(filters: &UserSearchFilters, found: &[UserSuggestion]) {
    println!("Search: {}", filters.to_query());
    if found.is_empty() {
        println!("No users found");
        return;
    }
    for user in found {
        println!("{:<24} {}", user.login, user.account_type);
    }
}

async fn compare_profiles<S: KeyValueStore>(
    dashboard: &mut Dashboard<S>,
    pipeline: &AnalysisPipeline,
    logins: &[String],
) {
    if let Some(outcome) = dashboard.compare_current() {
        tracing::debug!("{}", outcome.notice());
    }

    for login in logins {
        match pipeline.load(login).await {
            Ok(Some(snapshot)) => {
                let outcome = dashboard.compare(&snapshot.profile, &snapshot.repositories);
                tracing::info!("{}: {}", login, outcome.notice());
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Could not compare {}: {}", login, e.user_message()),
        }
    }
}

fn apply_selection<S: KeyValueStore>(dashboard: &mut Dashboard<S>, args: &Args) -> anyhow::Result<()> {
    if let Some(ref sort) = args.sort {
        dashboard.dispatch(Action::SetSort(SortKey::parse(sort)))?;
    }
    if let Some(ref chart) = args.chart {
        let kind = ChartKind::parse(chart).ok_or_else(|| anyhow!("Unknown chart kind: {}", chart))?;
        dashboard.dispatch(Action::SetChartKind(kind))?;
    }
    if let Some(ref window) = args.window {
        let window = TimeWindow::parse(window).ok_or_else(|| anyhow!("Unknown time window: {}", window))?;
        dashboard.dispatch(Action::SetTimeWindow(window))?;
    }
    let filter = ActivityFilter::parse(&args.activity)
        .ok_or_else(|| anyhow!("Unknown activity filter: {}", args.activity))?;
    dashboard.dispatch(Action::SetActivityFilter(filter))?;

    if let Some(ref theme) = args.theme {
        let dark = match theme.trim().to_lowercase().as_str() {
            "dark" => true,
            "light" => false,
            other => bail!("Unknown theme: {}", other),
        };
        dashboard.dispatch(Action::SetDarkMode(dark))?;
    }

    Ok(())
}

fn write_charts<S: KeyValueStore>(dashboard: &Dashboard<S>, dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    let today = Local::now().date_naive();

    let charts: [(&str, Drawing); 4] = [
        ("languages.svg", dashboard.language_chart()),
        ("language-trend.svg", dashboard.language_trend()),
        ("activity.svg", dashboard.activity_chart(today, &Local)),
        ("heatmap.svg", dashboard.heatmap(today, &Local)),
    ];

    for (name, drawing) in charts {
        let path = dir.join(name);
        std::fs::write(&path, to_svg(&drawing))?;
        tracing::info!("Chart written to: {}", path.display());
    }

    Ok(())
}

fn print_history<S: KeyValueStore>(dashboard: &Dashboard<S>) {
    let now = Utc::now();
    let history = dashboard.store().history();
    if history.is_empty() {
        println!("No recent searches");
        return;
    }
    for entry in history {
        println!(
            "{:<24} {:<30} {}",
            entry.login,
            entry.name.as_deref().unwrap_or(""),
            time_ago_millis(entry.timestamp, now)
        );
    }
}

fn print_bookmarks<S: KeyValueStore>(dashboard: &Dashboard<S>) {
    let now = Utc::now();
    let bookmarks = dashboard.store().bookmarks();
    if bookmarks.is_empty() {
        println!("No bookmarked profiles");
        return;
    }
    for entry in bookmarks {
        println!(
            "{:<24} {:<30} {}",
            entry.login,
            entry.name.as_deref().unwrap_or(""),
            time_ago_millis(entry.bookmarked_at, now)
        );
    }
}

fn output_report(report: &Report<'_>, args: &Args) -> anyhow::Result<()> {
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

fn primary_language(report: &Report<'_>) -> String {
    report
        .insights
        .primary_language
        .clone()
        .unwrap_or_else(|| "Various".to_string())
}

fn format_text(report: &Report<'_>) -> String {
    let mut output = String::new();
    let profile = report.profile;

    output.push_str(&format!("\n=== GitHub Profile: {} ===\n\n", profile.login));
    output.push_str(&format!("Name: {}\n", profile.display_name()));
    if let Some(bio) = profile.bio.as_deref().filter(|_| profile.has_bio()) {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    if let Some(ref location) = profile.location {
        output.push_str(&format!("Location: {}\n", location));
    }
    output.push_str(&format!("Joined: {}\n\n", format_date(profile.created_at)));

    let metrics = &report.metrics;
    output.push_str(&format!(
        "Followers: {}  Following: {}  Repositories: {}\n",
        format_number(u64::from(metrics.followers)),
        format_number(u64::from(metrics.following)),
        format_number(u64::from(metrics.public_repos))
    ));
    output.push_str(&format!(
        "Total stars: {}  Total forks: {}\n",
        format_number(metrics.totals.stars),
        format_number(metrics.totals.forks)
    ));
    output.push_str(&format!("Developer score: {}/100\n", report.score.total));

    output.push_str("\nInsights:\n");
    output.push_str(&format!("  Primary language: {}\n", primary_language(report)));
    output.push_str(&format!("  Coding frequency: {}\n", report.insights.coding_frequency));
    output.push_str(&format!("  Collaboration: {}\n", report.insights.collaboration_level));
    output.push_str(&format!("  Project diversity: {}\n", report.insights.project_diversity));

    let quality = &report.code_quality;
    output.push_str("\nCode quality:\n");
    output.push_str(&format!("  Average size: {:.0} KB\n", quality.avg_repo_size));
    output.push_str(&format!("  Documented: {:.0}%\n", quality.documentation_score));
    output.push_str(&format!("  Maintained (3 months): {:.0}%\n", quality.maintenance_score));
    output.push_str(&format!("  Average stars: {:.1}\n", quality.popularity_score));

    if !report.languages.is_empty() {
        output.push_str("\nLanguages:\n");
        for entry in &report.languages {
            output.push_str(&format!("  {} {}\n", entry.color, entry.label()));
        }
    }

    if !report.achievements.is_empty() {
        output.push_str("\nAchievements:\n");
        for achievement in &report.achievements {
            output.push_str(&format!(
                "  * {} [{}]: {}\n",
                achievement.title, achievement.rarity, achievement.description
            ));
        }
    }

    output.push_str("\nRecommendations:\n");
    for rec in &report.recommendations {
        output.push_str(&format!("  - {}: {}\n", rec.title, rec.description));
    }

    output.push_str(&format!("\nRepositories ({}):\n", report.repositories.info()));
    for repo in &report.repositories.items {
        output.push_str(&format!(
            "  {:<32} {:>6} stars {:>5} forks  {}\n",
            repo.name,
            format_number(u64::from(repo.stargazers_count)),
            format_number(u64::from(repo.forks_count)),
            repo.language().unwrap_or("-")
        ));
    }

    if !report.comparison.is_empty() {
        output.push_str("\nComparison:\n");
        for profile in report.comparison {
            output.push_str(&format!(
                "  {:<24} {:>8} followers {:>5} repos {:>8} stars  {}\n",
                profile.login,
                format_number(u64::from(profile.followers)),
                profile.public_repos,
                format_number(profile.totals.stars),
                profile.primary_language.as_deref().unwrap_or("-")
            ));
        }
    }

    if !report.timeline.is_empty() {
        output.push_str("\nRecent activity:\n");
        for entry in &report.timeline {
            output.push_str(&format!(
                "  {} {} ({})\n",
                entry.description, entry.repo, entry.time_ago
            ));
        }
    }

    output
}

fn format_markdown(report: &Report<'_>) -> String {
    let mut output = String::new();
    let profile = report.profile;

    output.push_str(&format!("# GitHub Profile: {}\n\n", profile.login));
    output.push_str(&format!("**Name:** {}\n\n", profile.display_name()));
    if let Some(bio) = profile.bio.as_deref().filter(|_| profile.has_bio()) {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str("## Metrics\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Followers | {} |\n", format_number(u64::from(report.metrics.followers))));
    output.push_str(&format!("| Public Repositories | {} |\n", report.metrics.public_repos));
    output.push_str(&format!("| Total Stars | {} |\n", format_number(report.metrics.totals.stars)));
    output.push_str(&format!("| Total Forks | {} |\n", format_number(report.metrics.totals.forks)));
    output.push_str(&format!("| Developer Score | {}/100 |\n", report.score.total));
    output.push_str(&format!("| Primary Language | {} |\n", primary_language(report)));

    output.push_str("\n## Insights\n\n");
    output.push_str(&format!("- **Coding frequency:** {}\n", report.insights.coding_frequency));
    output.push_str(&format!("- **Collaboration:** {}\n", report.insights.collaboration_level));
    output.push_str(&format!("- **Project diversity:** {}\n", report.insights.project_diversity));
    output.push_str(&format!(
        "- **Documented repositories:** {:.0}%\n",
        report.code_quality.documentation_score
    ));
    output.push_str(&format!(
        "- **Maintained in last 3 months:** {:.0}%\n",
        report.code_quality.maintenance_score
    ));

    if !report.languages.is_empty() {
        output.push_str("\n## Languages\n\n");
        for entry in &report.languages {
            output.push_str(&format!("- {}\n", entry.label()));
        }
    }

    output.push_str("\n## Recommendations\n\n");
    for rec in &report.recommendations {
        output.push_str(&format!("- **{}**: {}\n", rec.title, rec.description));
    }

    if !report.comparison.is_empty() {
        output.push_str("\n## Comparison\n\n");
        output.push_str("| Login | Followers | Repositories | Stars | Primary Language |\n");
        output.push_str("|-------|-----------|--------------|-------|------------------|\n");
        for profile in report.comparison {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                profile.login,
                profile.followers,
                profile.public_repos,
                profile.totals.stars,
                profile.primary_language.as_deref().unwrap_or("-")
            ));
        }
    }

    output.push_str(&format!("\n## Repositories ({})\n\n", report.repositories.info()));
    output.push_str("| Name | Stars | Forks | Language |\n|------|-------|-------|----------|\n");
    for repo in &report.repositories.items {
        output.push_str(&format!(
            "| [{}]({}) | {} | {} | {} |\n",
            repo.name,
            repo.html_url,
            repo.stargazers_count,
            repo.forks_count,
            repo.language().unwrap_or("-")
        ));
    }

    output
}
