extern crate color_eyre;
extern crate keypoint_vis;

use std::env;
use std::path::PathBuf;
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use keypoint_vis::{load_runtime_conf, pipeline};

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let root = match env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => env::current_dir().wrap_err("could not resolve the working directory")?
    };

    let runtime_conf = load_runtime_conf(&root).wrap_err_with(|| format!("could not load runtime config under {}", root.display()))?;
    pipeline::run(&root, &runtime_conf).wrap_err("keypoint visualization failed")?;

    // for a gif: convert -delay 3 -quality 85% -loop 0 per_frame_keypoints_vis/*.png seq.gif
    Ok(())
}
