//! Light Lister CLI - compare scene lights against a light preset.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use light_lister::lister::scene_to_preset;
use light_lister::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_DATE: &str = env!("LIGHT_LISTER_BUILD_DATE");
const BUILD_TIME: &str = env!("LIGHT_LISTER_BUILD_TIME");

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    // Parse global flags
    let mut level = "info";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "error",
            _ => filtered_args.push(arg),
        }
    }

    if filtered_args.is_empty() {
        print_help();
        return ExitCode::SUCCESS;
    }

    // The panel installs its own subscriber
    if !matches!(filtered_args[0], "view" | "v") {
        init_logging(level);
    }

    let result = match filtered_args[0] {
        "list" | "l" => cmd_list(&filtered_args[1..]),
        "icons" | "i" => cmd_icons(&filtered_args[1..]),
        "capture" | "c" => cmd_capture(&filtered_args[1..]),
        "view" | "v" => cmd_view(&filtered_args[1..]),
        "version" | "--version" | "-V" => {
            println!("light-lister {} (built {} {})", VERSION, BUILD_DATE, BUILD_TIME);
            Ok(())
        }
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_help();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_help() {
    println!("light-lister - Scene light lister with preset validation");
    println!();
    println!("USAGE:");
    println!("    light-lister [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    l, list    <scene.json> [list options]   List lights with their status");
    println!("    i, icons   [dir] [--force]               Render missing status icons");
    println!("    c, capture <scene.json> <preset>         Write scene lights into a preset");
    println!("    v, view    [scene.json]                  Open the light list panel");
    println!("    version                                  Show version and build date");
    println!("    h, help                                  Show this help");
    println!();
    println!("LIST OPTIONS:");
    println!("    --preset <file>          Compare against a .lightpreset file");
    println!("    --filter <query>         Only show rows matching every word");
    println!("    --sort <type|name|status>");
    println!("    --desc                   Sort descending");
    println!("    --legacy                 Use the legacy diff");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Show debug output");
    println!("    -vv, --trace     Show trace output (very verbose)");
    println!("    -q, --quiet      Only show errors");
    println!();
    println!("EXAMPLES:");
    println!("    light-lister list scene.json --preset shot.lightpreset");
    println!("    light-lister list scene.json --filter \"grp key\" --sort status");
    println!("    light-lister capture scene.json shot.lightpreset");
}

/// Options of the `list` command.
#[derive(Debug, Default)]
struct ListArgs {
    scene: PathBuf,
    preset: Option<PathBuf>,
    filter: String,
    sort: Option<Column>,
    order: SortOrder,
    legacy: bool,
}

fn parse_list_args(args: &[&str]) -> Result<ListArgs> {
    let mut parsed = ListArgs::default();
    let mut scene = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--preset" | "-p" => {
                let value = iter.next().ok_or_else(|| Error::other("--preset needs a file"))?;
                parsed.preset = Some(PathBuf::from(value));
            }
            "--filter" | "-f" => {
                let value = iter.next().ok_or_else(|| Error::other("--filter needs a query"))?;
                parsed.filter = value.to_string();
            }
            "--sort" | "-s" => {
                let value = iter.next().ok_or_else(|| Error::other("--sort needs a column"))?;
                let column = Column::from_name(value)
                    .ok_or_else(|| Error::other(format!("unknown sort column: {}", value)))?;
                parsed.sort = Some(column);
            }
            "--desc" => parsed.order = SortOrder::Descending,
            "--legacy" => parsed.legacy = true,
            other if scene.is_none() && !other.starts_with('-') => scene = Some(PathBuf::from(other)),
            other => return Err(Error::other(format!("unexpected argument: {}", other))),
        }
    }
    parsed.scene = scene.ok_or_else(|| Error::other("missing scene file (usage: light-lister list <scene.json>)"))?;
    Ok(parsed)
}

fn cmd_list(args: &[&str]) -> Result<()> {
    let args = parse_list_args(args)?;
    let settings = Settings::load();

    info!("Opening scene: {}", args.scene.display());
    let scene = MemoryScene::load(&args.scene)?;

    let mut preset = PresetDocument::new();
    if let Some(path) = &args.preset {
        preset.load(path)?;
    }

    let mode = if args.legacy { DiffMode::Legacy } else { settings.diff_mode() };
    let mut lister = LightLister::new(mode);
    lister.refresh(&scene)?;

    let icon_dir = settings.icon_dir(scene.user_script_dir().as_deref());
    let icons = Arc::new(IconCache::with_scale(icon_dir, settings.icon_scale));
    let mut table = LightTable::new(icons);
    table.populate(lister.rows(preset.preset()));
    if let Some(column) = args.sort {
        table.sort_by(column, args.order);
    }
    table.apply_filter(&args.filter);

    let mut counts = [0usize; 5];
    for (_, row) in table.visible_rows() {
        let row = &row.row;
        counts[row.status.severity() as usize] += 1;
        println!("{} {:<40} [{}]", row.status.symbol(), row.display_name, row.light_type);
    }

    let hidden = table.hidden().len();
    debug!("{} rows hidden by filter", hidden);
    println!();
    let summary: Vec<String> = Status::ALL
        .iter()
        .filter(|s| counts[s.severity() as usize] > 0)
        .map(|s| format!("{} {}", counts[s.severity() as usize], s))
        .collect();
    if summary.is_empty() {
        println!("No lights");
    } else {
        println!("{}", summary.join(", "));
    }
    if hidden > 0 {
        println!("({} hidden by filter)", hidden);
    }
    Ok(())
}

fn cmd_icons(args: &[&str]) -> Result<()> {
    let force = args.contains(&"--force");
    let settings = Settings::load();
    let dir = args
        .iter()
        .find(|a| !a.starts_with('-'))
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.icon_dir(None));

    let icons = IconCache::new(&dir);
    if force {
        icons.render_all()?;
        println!("Rendered all icons in {}", dir.display());
        return Ok(());
    }

    let rendered = icons.ensure_required()?;
    if rendered.is_empty() {
        println!("All icons present in {}", dir.display());
    } else {
        for kind in rendered {
            println!("Rendered {}", dir.join(kind.file_name()).display());
        }
    }
    Ok(())
}

fn cmd_capture(args: &[&str]) -> Result<()> {
    let (scene_path, preset_path) = match args {
        [scene, preset, ..] => (Path::new(scene), Path::new(preset)),
        _ => return Err(Error::other("usage: light-lister capture <scene.json> <preset>")),
    };

    let scene = MemoryScene::load(scene_path)?;
    let mut lister = LightLister::default();
    let lights = lister.refresh(&scene)?;

    let mut doc = PresetDocument::new();
    if preset_path.exists() {
        doc.load(preset_path)?;
    }
    let changed = scene_to_preset(lights, doc.preset_mut());
    doc.save_as(preset_path)?;
    println!(
        "{} entries changed, {} lights in {}",
        changed,
        doc.preset().len(),
        preset_path.display()
    );
    Ok(())
}

#[cfg(feature = "viewer")]
fn cmd_view(args: &[&str]) -> Result<()> {
    let file = args.first().map(PathBuf::from);
    light_lister::viewer::run(file).map_err(|e| Error::other(format!("Viewer error: {}", e)))
}

#[cfg(not(feature = "viewer"))]
fn cmd_view(_args: &[&str]) -> Result<()> {
    Err(Error::other("Viewer not available. Rebuild with: cargo build --features viewer"))
}
