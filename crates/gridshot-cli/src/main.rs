mod blender;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gridshot::config::Config;
use gridshot::driver::Driver;
use gridshot::output::OutputLayout;

use blender::BlenderHost;

#[derive(Parser, Debug)]
pub struct Args {
    /// Run configuration, RON format
    #[arg(short, long, default_value = "config.ron")]
    config: PathBuf,

    /// Root of the output tree
    #[arg(short, long, default_value = "output")]
    out: PathBuf,

    /// Host application binary used for the renders
    #[arg(long, default_value = "blender")]
    host_bin: String,

    /// Where the generated batch script is written. Defaults to
    /// <OUT>/render_grid.py
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write metadata and the batch script but skip the host launch
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = Config::load(&args.config)?;
    log::info!("config version {}", config.version);
    log::info!("working dir {}", std::env::current_dir()?.display());

    let layout = OutputLayout::new(&args.out);
    layout.create_dirs()?;

    let script_path = args
        .script
        .unwrap_or_else(|| args.out.join("render_grid.py"));
    let mut host = BlenderHost::new(&config, script_path);

    Driver::new(&config, &layout).run(&mut host)?;

    let script = host.finish()?;
    if args.dry_run {
        log::info!("dry run, skipping launch of {}", args.host_bin);
        return Ok(());
    }
    blender::launch(&args.host_bin, &script)
}
