//! exhibit3d - educational 3D model viewer with graceful placeholder fallback
//!
//! Opens an interactive viewer for one model from a small fixed catalog.
//! The asset is fetched over HTTP, parsed as glTF, and on any failure the
//! viewer degrades to a procedural placeholder shape after a short visible
//! error window.
//!
//! Usage: exhibit3d [model-id] [--base <url>] [--catalog <path.json>]

mod app;
mod camera;
mod catalog;
mod lights;
mod loader;
mod placeholder;
mod presets;
mod render;
mod settings;
mod viewer;

use catalog::{AssetRequest, Catalog};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

struct Options {
    model_id: Option<String>,
    base_url: String,
    catalog_path: Option<PathBuf>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        model_id: None,
        base_url: DEFAULT_BASE_URL.to_string(),
        catalog_path: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base" => {
                options.base_url = args.next().ok_or("--base requires a URL")?;
            }
            "--catalog" => {
                let path = args.next().ok_or("--catalog requires a path")?;
                options.catalog_path = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag: {flag}"));
            }
            id => {
                if options.model_id.replace(id.to_string()).is_some() {
                    return Err("more than one model id given".to_string());
                }
            }
        }
    }
    Ok(options)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            log::error!("{message}");
            log::error!("usage: exhibit3d [model-id] [--base <url>] [--catalog <path.json>]");
            return ExitCode::FAILURE;
        }
    };

    let catalog = match &options.catalog_path {
        Some(path) => match Catalog::from_json_file(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::error!("failed to load catalog {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Catalog::builtin(),
    };

    let entry = match &options.model_id {
        Some(id) => match catalog.find(id) {
            Some(entry) => entry,
            None => {
                log::error!("model not found: {id}");
                log::error!(
                    "available models: {}",
                    catalog
                        .entries()
                        .iter()
                        .map(|entry| entry.id.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                return ExitCode::FAILURE;
            }
        },
        None => match catalog.entries().first() {
            Some(entry) => entry,
            None => {
                log::error!("catalog is empty");
                return ExitCode::FAILURE;
            }
        },
    };

    let request = AssetRequest::for_entry(entry, &options.base_url);
    log::info!(
        "viewing {} ({} / {}) from {}",
        entry.title,
        entry.category,
        entry.difficulty,
        request.url
    );

    match app::run(request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event loop error: {err}");
            ExitCode::FAILURE
        }
    }
}
