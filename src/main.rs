use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use stitchkit::{
    init_logging, save_png, CanvasEvent, DisplayMode, PatternCanvas, PatternProject, PatternView,
    RenderContext, SettingsPersistence,
};
use tracing::info;

/// Render a cross-stitch pattern project to a PNG preview.
#[derive(Debug, Parser)]
#[command(name = "stitchkit", version, about)]
struct Args {
    /// Pattern project (JSON)
    pattern: PathBuf,

    /// Output image, defaults to the pattern path with a .png extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Display mode: solid, stitches or mixed
    #[arg(long)]
    mode: Option<DisplayMode>,

    /// Draw palette symbols over stitches
    #[arg(long)]
    symbols: bool,

    /// Configuration file (TOML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = Args::parse();

    let persistence = match &args.config {
        Some(path) => SettingsPersistence::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SettingsPersistence::default_path()
            .map(|path| SettingsPersistence::load_or_default(&path))
            .unwrap_or_else(|_| SettingsPersistence::new("config.toml")),
    };
    let config = persistence.config();

    let project = PatternProject::from_path(&args.pattern)
        .with_context(|| format!("loading pattern {}", args.pattern.display()))?;

    let mut ctx = RenderContext::new(&config.render);
    let mut canvas = PatternCanvas::new(
        &config.canvas,
        args.width as f32,
        args.height as f32,
        Vec::<CanvasEvent>::new(),
    );

    let mut view = PatternView::new(project);
    view.set_show_symbols(args.symbols || config.render.show_symbols);
    canvas.set_pattern_view(&mut ctx, view)?;
    if let (Some(mode), Some(view)) = (args.mode, canvas.view_mut()) {
        view.set_display_mode(&mut ctx, mode)?;
    }

    let image = canvas.render(&mut ctx)?;
    let output = args
        .output
        .unwrap_or_else(|| args.pattern.with_extension("png"));
    save_png(&image, &output)?;
    info!(
        "Wrote {}x{} preview to {}",
        image.width(),
        image.height(),
        output.display()
    );

    canvas.clear_pattern_view(&mut ctx);
    Ok(())
}
