//! Micronize - Markdown to Micron converter.
//!
//! # Usage
//!
//! ```bash
//! micronize convert README.md
//! micronize convert content --out-dir blog --watch
//! micronize release --repo lxmfy/LXMFy --output index.mu
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use micronize::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use micronize::perf;
use micronize::release::{
    self, AssetFetcher, GithubClient, PageOptions, parse_repo_slug, render_page, sync_assets,
};
use micronize::site::convert_path;
use micronize::transduce::Profile;
use micronize::watcher::SourceWatcher;

const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);
const WATCH_POLL: Duration = Duration::from_millis(250);

/// Convert Markdown documents and release notes to Micron pages
#[derive(Parser, Debug)]
#[command(name = "micronize", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Rebuild whenever a source file changes (convert only)
    #[arg(short, long, global = true)]
    watch: bool,

    /// Log conversion timings
    #[arg(long, global = true)]
    perf: bool,

    /// Write detailed conversion events to a file
    #[arg(long, value_name = "PATH", global = true)]
    debug_log: Option<PathBuf>,

    /// Turn whitespace-only lines inside code fences into empty lines
    #[arg(long, global = true)]
    collapse_fence_blanks: bool,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a Markdown file, or every Markdown file under a directory
    Convert {
        /// Markdown file or content directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory to write `.mu` pages into
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Render the latest release of a GitHub repository as a Micron page
    Release {
        /// Repository to query, as OWNER/NAME
        #[arg(long, value_name = "OWNER/NAME", required_unless_present = "from_json")]
        repo: Option<String>,

        /// Read release metadata from a JSON file instead of the GitHub API
        #[arg(long, value_name = "PATH")]
        from_json: Option<PathBuf>,

        /// Page to write
        #[arg(short, long, value_name = "FILE", default_value = "index.mu")]
        output: PathBuf,

        /// Local directory holding downloaded assets
        #[arg(long, value_name = "DIR", default_value = "files")]
        files_dir: PathBuf,

        /// Link prefix for assets on the node
        #[arg(long, value_name = "PREFIX", default_value = "/file/")]
        files_base: String,

        /// Project name shown in the page title (defaults to the repository name)
        #[arg(long)]
        project: Option<String>,

        /// List cached assets only, never download
        #[arg(long)]
        no_download: bool,
    },
}

impl Cli {
    /// The subset of flags that can be saved as defaults.
    fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            watch: self.watch,
            perf: self.perf,
            collapse_fence_blanks: self.collapse_fence_blanks,
            debug_log: self.debug_log.clone(),
            out_dir: match &self.command {
                Command::Convert { out_dir, .. } => out_dir.clone(),
                Command::Release { .. } => None,
            },
        }
    }
}

struct ReleaseArgs<'a> {
    repo: Option<&'a str>,
    from_json: Option<&'a Path>,
    output: &'a Path,
    files_dir: &'a Path,
    files_base: &'a str,
    project: Option<&'a str>,
    no_download: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.config_flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
        tracing::info!("Saved defaults to {}", global_path.display());
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::enable_timings(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("MICRONIZE_DEBUG_LOG").map(PathBuf::from));
    if let Some(path) = &debug_log_path
        && let Err(err) = perf::open_event_log(path)
    {
        tracing::warn!("Failed to open debug log {}: {}", path.display(), err);
    }

    match &cli.command {
        Command::Convert { input, .. } => {
            let out_dir = effective.out_dir.clone();
            let profile = effective.document_profile();
            run_convert(input, out_dir.as_deref(), &profile)?;
            if effective.watch {
                watch_and_convert(input, out_dir.as_deref(), &profile)?;
            }
            Ok(())
        }
        Command::Release {
            repo,
            from_json,
            output,
            files_dir,
            files_base,
            project,
            no_download,
        } => {
            if effective.watch {
                tracing::warn!("--watch only applies to convert; ignoring");
            }
            run_release(&ReleaseArgs {
                repo: repo.as_deref(),
                from_json: from_json.as_deref(),
                output,
                files_dir,
                files_base,
                project: project.as_deref(),
                no_download: *no_download,
            })
        }
    }
}

fn run_convert(input: &Path, out_dir: Option<&Path>, profile: &Profile) -> Result<()> {
    let _phase = perf::phase("convert");
    let report = convert_path(input, out_dir, profile)?;
    for page in &report.pages {
        tracing::debug!("Wrote {} ({} lines)", page.output.display(), page.lines);
    }
    tracing::info!("Converted {} file(s) from {}", report.len(), input.display());
    if perf::timings_enabled()
        && let Some(slowest) = report.slowest()
    {
        tracing::info!(
            target: "micronize::perf",
            total_ms = perf::millis(report.total_elapsed()),
            slowest = %slowest.source.display(),
            slowest_ms = perf::millis(slowest.elapsed),
            "per-file conversion"
        );
    }
    Ok(())
}

fn watch_and_convert(input: &Path, out_dir: Option<&Path>, profile: &Profile) -> Result<()> {
    let mut watcher = SourceWatcher::new(input, WATCH_DEBOUNCE)
        .with_context(|| format!("Failed to watch {}", input.display()))?;
    tracing::info!("Watching {} for changes", watcher.watch_root().display());
    loop {
        std::thread::sleep(WATCH_POLL);
        if !watcher.take_change_ready() {
            continue;
        }
        if let Err(err) = run_convert(input, out_dir, profile) {
            tracing::error!("Rebuild failed: {err:#}");
        }
    }
}

fn run_release(args: &ReleaseArgs<'_>) -> Result<()> {
    let _phase = perf::phase("release");
    let slug = args.repo.map(parse_repo_slug).transpose()?;

    let client = if args.from_json.is_none() || !args.no_download {
        Some(GithubClient::new().context("Failed to create HTTP client")?)
    } else {
        None
    };

    let release = match (args.from_json, slug, &client) {
        (Some(path), _, _) => release::load_release_json(path)?,
        (None, Some((owner, repo)), Some(client)) => client
            .latest_release(owner, repo)
            .with_context(|| format!("Failed to fetch latest release of {owner}/{repo}"))?,
        _ => anyhow::bail!("Either --repo or --from-json is required"),
    };

    let fetcher = client
        .as_ref()
        .filter(|_| !args.no_download)
        .map(|client| client as &dyn AssetFetcher);
    let assets = sync_assets(&release, args.files_dir, fetcher);

    let options = PageOptions {
        project: args
            .project
            .map(ToOwned::to_owned)
            .or_else(|| slug.map(|(_, repo)| repo.to_string())),
        files_base: args.files_base.to_string(),
    };
    let page = render_page(&release, &assets, &options);

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(args.output, format!("{}\n", page.to_markup()))
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    tracing::info!(
        "Updated {} with latest release info and {} local asset link(s)",
        args.output.display(),
        assets.len()
    );
    Ok(())
}
