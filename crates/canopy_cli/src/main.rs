//! Preview entry point.
//!
//! # Responsibility
//! - Run the page behaviors against an in-memory page skeleton.
//! - Print the resulting markup so content and copy can be checked
//!   without a browser.

use anyhow::{anyhow, bail, Context, Result};
use canopy_core::{
    default_log_level, init_logging, DomPort, EventOutcome, LogLevel, MemoryDom, NodeId,
    PageClock, PageEvent, PageTemplate, Selector, SiteConfig, SitePage,
};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

/// Upper bound on simulated frames so a bad duration cannot spin forever.
const MAX_FRAMES: u32 = 100_000;

#[derive(Debug, Parser)]
#[command(name = "canopy", version, about = "Preview the showcase site's page behaviors")]
struct Cli {
    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render one page template after startup and optional interactions.
    Preview(PreviewArgs),
    /// List page templates.
    Pages,
}

#[derive(Debug, clap::Args)]
struct PreviewArgs {
    /// index|projects|contact|gallery
    page: PageTemplate,

    /// JSON site config; built-in sample data when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Click the filter control with this key (e.g. `renewable`, `all`).
    #[arg(long)]
    filter: Option<String>,

    /// Click the mobile navigation toggle.
    #[arg(long)]
    toggle_nav: bool,

    /// Type into a form field before submitting, as `id=value`.
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Submit the form with this id after filling fields.
    #[arg(long)]
    submit: Option<String>,

    /// Simulated frame interval for counter animations.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Calendar year to stamp; the local year when omitted.
    #[arg(long)]
    year: Option<i32>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `id=value`, got `{raw}`"))?;
    if id.trim().is_empty() {
        return Err("field id must not be empty".to_string());
    }
    Ok((id.trim().to_string(), value.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.unwrap_or_else(default_log_level);
        init_logging(level, log_dir).context("starting file logs")?;
    }

    match cli.command {
        Command::Pages => {
            for template in PageTemplate::ALL {
                println!("{template}");
            }
            Ok(())
        }
        Command::Preview(args) => preview(args),
    }
}

fn preview(args: PreviewArgs) -> Result<()> {
    if !args.frame_ms.is_finite() || args.frame_ms <= 0.0 {
        bail!("--frame-ms must be a positive number, got {}", args.frame_ms);
    }

    let config = match &args.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading site config {}", path.display()))?,
        None => SiteConfig::default(),
    };

    let mut dom = args
        .page
        .build()
        .with_context(|| format!("building `{}` template", args.page))?;
    let clock = match args.year {
        Some(year) => PageClock { year, now_ms: 0.0 },
        None => PageClock::local(0.0),
    };
    let mut page = SitePage::init(&mut dom, &config, clock).context("page startup")?;
    info!(
        "event=preview_started module=cli status=ok page={} report={:?}",
        args.page,
        page.report()
    );

    if args.toggle_nav {
        let toggle = dom
            .query_all(Selector::Class("nav-toggle"))
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("page `{}` has no navigation toggle", args.page))?;
        report(page.handle(&mut dom, PageEvent::Click(toggle))?);
    }

    if let Some(key) = &args.filter {
        let control = find_filter(&dom, key)
            .ok_or_else(|| anyhow!("page `{}` has no filter control `{key}`", args.page))?;
        report(page.handle(&mut dom, PageEvent::Click(control))?);
    }

    for (id, value) in &args.fields {
        let field = dom
            .find_by_id(id)
            .ok_or_else(|| anyhow!("page `{}` has no field #{id}", args.page))?;
        dom.set_field_value(field, value)?;
    }

    if let Some(form_id) = &args.submit {
        let form = dom
            .find_by_id(form_id)
            .ok_or_else(|| anyhow!("page `{}` has no form #{form_id}", args.page))?;
        report(page.handle(&mut dom, PageEvent::Submit(form))?);
    }

    let frames = run_frames(&mut page, &mut dom, args.frame_ms)?;
    if frames > 0 {
        eprintln!("counters settled after {frames} frames");
    }

    println!("{}", dom.outer_html(dom.body()));
    Ok(())
}

fn find_filter(dom: &MemoryDom, key: &str) -> Option<NodeId> {
    dom.query_all(Selector::Class("filter-pill"))
        .into_iter()
        .find(|pill| dom.attribute(pill, "data-filter").as_deref() == Some(key))
}

fn run_frames(page: &mut SitePage<NodeId>, dom: &mut MemoryDom, frame_ms: f64) -> Result<u32> {
    let mut frames = 0;
    let mut now = 0.0;
    while page.has_pending_frames() {
        if frames >= MAX_FRAMES {
            bail!("counters still running after {MAX_FRAMES} frames");
        }
        now += frame_ms;
        page.frame(dom, now)?;
        frames += 1;
    }
    Ok(frames)
}

fn report(outcome: EventOutcome) {
    match outcome {
        EventOutcome::NavToggled { open } => eprintln!("nav toggled: open={open}"),
        EventOutcome::FilterApplied { visible } => eprintln!("filter applied: {visible} visible"),
        EventOutcome::FormHandled(outcome) => eprintln!(
            "form {:?}: {} ({})",
            outcome.kind,
            outcome.message(),
            if outcome.accepted() { "accepted" } else { "rejected" }
        ),
        EventOutcome::Ignored => eprintln!("event ignored"),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_field, Cli};
    use clap::Parser;

    #[test]
    fn parses_field_pairs() {
        assert_eq!(
            parse_field("email=a@b.co").expect("valid pair"),
            ("email".to_string(), "a@b.co".to_string())
        );
        assert_eq!(
            parse_field("message=a=b").expect("value may contain `=`"),
            ("message".to_string(), "a=b".to_string())
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field(" =x").is_err());
    }

    #[test]
    fn parses_preview_command() {
        let cli = Cli::try_parse_from([
            "canopy",
            "preview",
            "projects",
            "--filter",
            "renewable",
            "--field",
            "name=Ada",
        ])
        .expect("valid command line");
        assert!(format!("{cli:?}").contains("Projects"));
    }

    #[test]
    fn parses_global_log_level() {
        let cli = Cli::try_parse_from(["canopy", "--log-level", "WARN", "pages"])
            .expect("valid command line");
        assert_eq!(cli.log_level, Some(canopy_core::LogLevel::Warn));
        assert!(Cli::try_parse_from(["canopy", "--log-level", "loud", "pages"]).is_err());
    }

    #[test]
    fn rejects_unknown_page() {
        assert!(Cli::try_parse_from(["canopy", "preview", "blog"]).is_err());
    }
}
