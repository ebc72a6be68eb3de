//! CLI logic for the c4view diagram viewer.
//!
//! `render` turns one view, read from a file or fetched from the backend,
//! into an SVG file; `serve` runs the HTTP viewer.

pub mod error_adapter;
pub mod serve;

mod args;
mod config;

pub use args::{Args, Command, RenderArgs, ServeArgs};

use std::fs;

use log::info;

use c4view::{C4ViewError, Viewer};

/// Run the c4view CLI application
///
/// # Errors
///
/// Returns `C4ViewError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Backend errors
/// - Layout errors
/// - Rendering errors
pub async fn run(args: &Args) -> Result<(), C4ViewError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(base_url) = &args.base_url {
        app_config = app_config.with_base_url(base_url);
    }
    let viewer = Viewer::new(app_config);

    match &args.command {
        Command::Render(render) => render_view(&viewer, render).await,
        Command::Serve(serve_args) => {
            serve::serve(viewer, &serve_args.host, serve_args.port).await
        }
    }
}

async fn render_view(viewer: &Viewer, args: &RenderArgs) -> Result<(), C4ViewError> {
    let view = match (&args.input, args.kind, &args.id) {
        (Some(input), _, _) => {
            info!(input_path = input, output_path = args.output; "Rendering view payload");
            let source = fs::read_to_string(input)?;
            viewer.parse_view(&source)?
        }
        (None, Some(kind), Some(id)) => {
            info!(kind:% = kind, id, output_path = args.output; "Rendering view from backend");
            viewer.client()?.fetch_view(kind, id).await?
        }
        _ => {
            return Err(C4ViewError::Config(
                "either --input or --kind and --id are required".to_string(),
            ));
        }
    };

    viewer.write_svg(&view, &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
