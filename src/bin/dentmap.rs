use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dentmap", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Paint a condition report onto the side diagrams and write PNGs plus a summary.
    Render(RenderArgs),
    /// Validate the catalog and list asset files it references but cannot find.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Render config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the assets directory from the config.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Condition report JSON (`{"hood": 3, ...}`).
    #[arg(long)]
    report: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Report identifier; outputs go to `<out>/<report-id>/`.
    #[arg(long)]
    report_id: Option<String>,

    /// Side to render (repeatable). All four when omitted.
    #[arg(long = "side")]
    sides: Vec<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<dentmap::RenderConfig> {
    let mut cfg = match &args.config {
        Some(path) => dentmap::RenderConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => dentmap::RenderConfig::default(),
    };
    if let Some(assets) = &args.assets {
        cfg.assets_root = assets.clone();
    }
    Ok(cfg)
}

fn parse_sides(raw: &[String]) -> anyhow::Result<Vec<dentmap::Side>> {
    if raw.is_empty() {
        return Ok(dentmap::Side::ALL.to_vec());
    }
    let mut sides = Vec::with_capacity(raw.len());
    for s in raw {
        let side = dentmap::Side::parse(s)?;
        if !sides.contains(&side) {
            sides.push(side);
        }
    }
    Ok(sides)
}

#[derive(serde::Serialize)]
struct ConditionEntry {
    code: i64,
    status: &'static str,
}

impl From<dentmap::Severity> for ConditionEntry {
    fn from(s: dentmap::Severity) -> Self {
        Self {
            code: s.code(),
            status: s.status_text(),
        }
    }
}

#[derive(serde::Serialize)]
struct SideSummary<'a> {
    image: String,
    storage_key: Option<String>,
    conditions: BTreeMap<&'a str, ConditionEntry>,
    parts: &'a [dentmap::PartOutcome],
    numbering: &'a dentmap::NumberingStatus,
}

#[derive(serde::Serialize)]
struct Summary<'a> {
    report_id: Option<&'a str>,
    sides: BTreeMap<dentmap::Side, SideSummary<'a>>,
    unmatched: BTreeMap<&'a str, ConditionEntry>,
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if let Some(id) = &args.report_id {
        dentmap::validate_report_id(id)?;
    }
    let cfg = load_config(&args.config)?;
    let compositor = dentmap::SideCompositor::from_config(&cfg)?;
    let report = dentmap::ConditionReport::from_path(&args.report)?;
    let sides = parse_sides(&args.sides)?;

    let out_dir = match &args.report_id {
        Some(id) => args.out.join(id),
        None => args.out.clone(),
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let renders = compositor.composite_sides(&sides, &report)?;
    let grouped = report.by_side(compositor.catalog());

    let mut summary = Summary {
        report_id: args.report_id.as_deref(),
        sides: BTreeMap::new(),
        unmatched: grouped
            .unmatched
            .iter()
            .map(|(k, v)| (k.as_str(), ConditionEntry::from(*v)))
            .collect(),
    };

    for render in &renders {
        let file_name = render.side.output_file_name();
        write_png(&out_dir.join(&file_name), &render.image)?;

        let conditions: BTreeMap<&str, ConditionEntry> = grouped
            .sides
            .get(&render.side)
            .map(|parts| {
                parts
                    .iter()
                    .map(|(k, v)| (k.as_str(), ConditionEntry::from(*v)))
                    .collect()
            })
            .unwrap_or_default();

        summary.sides.insert(
            render.side,
            SideSummary {
                image: file_name,
                storage_key: args
                    .report_id
                    .as_deref()
                    .map(|id| render.side.storage_key(id))
                    .transpose()?,
                conditions,
                parts: &render.parts,
                numbering: &render.numbering,
            },
        );
    }

    let summary_path = out_dir.join("summary.json");
    let json = serde_json::to_vec_pretty(&summary).context("serialize summary")?;
    std::fs::write(&summary_path, json)
        .with_context(|| format!("write summary '{}'", summary_path.display()))?;

    eprintln!("wrote {}", out_dir.display());
    Ok(())
}

fn write_png(path: &Path, img: &image::RgbaImage) -> anyhow::Result<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    cfg.validate().context("invalid render config")?;
    let catalog = cfg.load_catalog()?;

    let missing = catalog.missing_assets(&cfg.assets_root);
    for m in &missing {
        tracing::warn!(side = %m.side, path = %m.path.display(), "missing asset");
    }

    let parts: usize = catalog.sides().iter().map(|s| s.parts.len()).sum();
    eprintln!(
        "catalog ok: {} sides, {parts} parts, {} missing asset(s) under '{}'",
        catalog.sides().len(),
        missing.len(),
        cfg.assets_root.display()
    );
    Ok(())
}
