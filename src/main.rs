use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{error, info};

use wirecast::app;
use wirecast::config::Args;
use wirecast::mesh::Mesh;
use wirecast::window::Window;

fn main() -> ExitCode {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "wirecast=info".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();

    match try_main(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: Args) -> Result<()> {
    let config = args.render_config();
    let mesh = Mesh::load(&args.model)
        .with_context(|| format!("could not load model {}", args.model.display()))?;

    if let Some(path) = &args.snapshot {
        app::snapshot(&mesh, &config)
            .save(path)
            .with_context(|| format!("could not write snapshot {}", path.display()))?;
        info!("Wrote snapshot to {}", path.display());
        return Ok(());
    }

    info!(
        "Opening {}x{} window, scale {}, color {}",
        config.width, config.height, config.scale, config.color
    );
    let mut window = Window::new("wirecast", config.width, config.height).map_err(|e| anyhow!(e))?;
    app::run(&mut window, mesh, &config).map_err(|e| anyhow!(e))?;
    Ok(())
}
