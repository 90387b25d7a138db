use std::path::{Path, PathBuf};

use eframe::egui;
use shopsight::app::DashboardApp;
use shopsight::data::loader;

fn main() -> eframe::Result {
    env_logger::init();

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let paths = if args.is_empty() {
        discover_inputs(Path::new("data"))
    } else {
        args
    };

    // A load failure is fatal: the dashboard has nothing to show without
    // its input tables.
    let dataset = match loader::load_files(&paths) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("failed to load input data: {e}");
            eprintln!("shopsight: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "loaded {} orders across {} categories",
        dataset.len(),
        dataset.categories.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("ShopSight"),
        ..Default::default()
    };

    eframe::run_native(
        "ShopSight",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(dataset)))),
    )
}

/// Default inputs: every supported file directly under `data/`, sorted so
/// concatenation order is stable across runs.
fn discover_inputs(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| {
            matches!(
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_ascii_lowercase())
                    .as_deref(),
                Some("csv" | "json" | "parquet" | "pq")
            )
        })
        .collect();
    paths.sort();
    paths
}
