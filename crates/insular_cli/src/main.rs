//! Insular CLI
//!
//! Drive the reveal dispatcher and the trail renderer against a headless
//! host and report what they did.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use insular_core::{Rect, Size};
use insular_paint::{flatten, RecordingCanvas};
use insular_platform::{Environment, Event, HeadlessHost};
use insular_reveal::{Document, RevealDispatcher, RevealMount, RevealStats};
use insular_trail::FluidTrail;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod page;

use config::InsularConfig;
use page::load_page;

#[derive(Parser)]
#[command(name = "insular")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Insular motion CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding insular.toml
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a page description and play its scroll animations
    Reveal {
        /// Page description (TOML)
        page: PathBuf,

        /// Scroll positions to visit, in order
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        scroll: Vec<f32>,

        /// Frames to run after the scan and after each scroll
        #[arg(short, long, default_value = "60")]
        frames: usize,
    },

    /// Mount the fluid trail on a canvas and run it
    Trail {
        #[arg(long, default_value = "1280")]
        width: f32,

        #[arg(long, default_value = "720")]
        height: f32,

        /// Pointer position `x,y` in canvas coordinates
        #[arg(short, long, value_delimiter = ',')]
        pointer: Vec<f32>,

        #[arg(short, long, default_value = "120")]
        frames: usize,
    },

    /// Validate insular.toml and page descriptions
    Check {
        /// Page descriptions to validate
        pages: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = InsularConfig::load_from_dir(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    match cli.command {
        Commands::Reveal {
            page,
            scroll,
            frames,
        } => cmd_reveal(config, &page, &scroll, frames),

        Commands::Trail {
            width,
            height,
            pointer,
            frames,
        } => cmd_trail(config, Size::new(width, height), &pointer, frames),

        Commands::Check { pages } => cmd_check(&cli.config, &pages),
    }
}

fn cmd_reveal(config: InsularConfig, page_path: &Path, scrolls: &[f32], frames: usize) -> Result<()> {
    let page = load_page(page_path)?;

    let env = Environment {
        viewport: page.viewport_or(Environment::default().viewport),
        reduced_motion: page.reduced_motion,
        scroll_y: page.scroll_y,
        ..Environment::default()
    };
    env.validate()
        .with_context(|| format!("Invalid environment in {}", page_path.display()))?;

    let host = Rc::new(HeadlessHost::with_environment(env));
    let doc = page.build(env.viewport);
    let root = doc.root();
    let init_delay_ms = config.reveal.init_delay_ms;
    let theme = config.theme.shared();

    let doc = Rc::new(RefCell::new(doc));
    let dispatcher = Rc::new(RefCell::new(
        RevealDispatcher::new(config.reveal).with_theme(theme.clone()),
    ));
    let mount = RevealMount::attach(host.clone(), doc.clone(), dispatcher.clone(), root);

    host.advance(init_delay_ms);
    info!(
        "Scanned {} ({} elements)",
        page_path.display(),
        doc.borrow().len()
    );
    print_stats("after scan", &dispatcher.borrow().stats());

    host.run_frames(frames);
    for &y in scrolls {
        host.dispatch(Event::scrolled(y));
        host.run_frames(frames);
        print_stats(&format!("after scroll to {y}"), &dispatcher.borrow().stats());
    }

    println!();
    print_document(&doc.borrow());
    if let Some(background) = theme.borrow().body_background() {
        println!("body background: {background}");
    }

    mount.detach();
    Ok(())
}

fn print_stats(label: &str, stats: &RevealStats) {
    println!(
        "{label}: {} armed, {} running, {} counters, {} pulses, {} parallax, {} sections, {} word reveals, {} marquees, {} tweens",
        stats.armed_entrances,
        stats.running_entrances,
        stats.armed_counters + stats.running_counters,
        stats.pulses,
        stats.parallax,
        stats.sections,
        stats.word_reveals,
        stats.marquees,
        stats.tweens,
    );
}

fn print_document(doc: &Document) {
    for id in doc.subtree(doc.root()) {
        let tag = doc.tag(id).unwrap_or("?");
        if let Some(kind) = doc.attribute(id, "data-animate") {
            let Some(style) = doc.style(id) else { continue };
            let m = &style.motion;
            println!(
                "  <{tag}> {kind:<11} opacity {:.3}  translate ({:.1}, {:.1})  scale {:.3}  blur {:.1}",
                m.opacity, m.translate_x, m.translate_y, m.scale, m.blur
            );
        }
        if doc.has_attribute(id, "data-counter") {
            println!("  <{tag}> counter     {:?}", doc.text(id).unwrap_or_default());
        }
    }
}

fn cmd_trail(config: InsularConfig, size: Size, pointer: &[f32], frames: usize) -> Result<()> {
    let target = match pointer {
        [] => None,
        [x, y] => Some((*x, *y)),
        _ => anyhow::bail!("--pointer takes two values, x,y"),
    };

    let host = Rc::new(HeadlessHost::new());
    let canvas = Rc::new(RefCell::new(RecordingCanvas::new(Rect::new(
        0.0,
        0.0,
        size.width,
        size.height,
    ))));
    let trail = FluidTrail::mount(
        host.clone(),
        canvas.clone(),
        Some(config.theme.shared()),
        config.trail,
    );

    if let Some((x, y)) = target {
        host.dispatch(Event::pointer_moved(x, y));
    }
    host.run_frames(frames);

    let snapshot = trail.snapshot();
    let fills = flatten(canvas.borrow().last_frame());
    let peak = fills
        .iter()
        .skip(1)
        .map(|f| f.max_alpha())
        .fold(0.0f32, f32::max);

    println!("frames:     {}", host.frames_run());
    println!(
        "brush:      ({:.1}, {:.1}) -> ({:.1}, {:.1})",
        snapshot.pointer.current.x,
        snapshot.pointer.current.y,
        snapshot.pointer.target.x,
        snapshot.pointer.target.y
    );
    println!("trail:      {} samples", snapshot.trail.len());
    println!("particles:  {}", snapshot.particles);
    println!("last frame: {} fills, peak alpha {:.3}", fills.len(), peak);

    trail.unmount();
    Ok(())
}

fn cmd_check(dir: &Path, pages: &[PathBuf]) -> Result<()> {
    match InsularConfig::find(dir) {
        Some(path) => info!("Configuration OK: {}", path.display()),
        None => info!("No insular.toml in {}, defaults apply", dir.display()),
    }

    for path in pages {
        let page = load_page(path)?;
        let doc = page.build(Environment::default().viewport);
        let animated = doc.query_attribute(doc.root(), "data-animate").len();
        let counters = doc.query_attribute(doc.root(), "data-counter").len();
        info!(
            "Page OK: {} ({} elements, {} animated, {} counters)",
            path.display(),
            doc.len(),
            animated,
            counters
        );
    }

    Ok(())
}
