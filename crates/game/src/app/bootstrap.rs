use std::path::PathBuf;
use std::process::ExitCode;

use engine::{resolve_app_paths, run_app, LoopConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use super::adventure::AdventureScene;

const WINDOW_TITLE: &str = "Adventure Prototype";
const DEFAULT_SCENE_FILE: &str = "village.json";

pub(crate) fn run() -> ExitCode {
    init_tracing();
    info!("=== Adventure Startup ===");

    let paths = match resolve_app_paths() {
        Ok(paths) => paths,
        Err(error) => {
            error!(error = %error, "startup_failed");
            return ExitCode::FAILURE;
        }
    };

    let scene_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.scenes_dir.join(DEFAULT_SCENE_FILE));

    let scene = AdventureScene::from_file(&scene_path).unwrap_or_else(|error| {
        error!(
            path = %scene_path.display(),
            error = error.as_str(),
            "scene_load_failed_using_empty_scene"
        );
        AdventureScene::empty()
    });

    let config = LoopConfig {
        window_title: WINDOW_TITLE.to_string(),
        asset_root: paths.assets_dir,
        ..LoopConfig::default()
    };

    if let Err(error) = run_app(config, Box::new(scene)) {
        error!(error = %error, "startup_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
