#![cfg_attr(windows, allow(dead_code, unused_imports))]

use std::{
    io,
    path::PathBuf,
    sync::{atomic::Ordering, Arc},
};

use clap::Parser;
use teleop::{CommandPublisher, InputLoop, NavigationClients, PoseCache, TeleopConfig};
use teleop_apps::{load_config, utils, Error, TeleopOverrides};
use teleop_arci::{
    DummyCancelSink, DummyCostmapClearer, DummyGoalSink, DummyMotionSink, DummyStatusSink,
    DummyTransformResolver,
};
use tracing::{debug, info};

/// Drive a mobile robot from the keyboard.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct Args {
    /// Path to the setting file.
    #[clap(short, long)]
    config_path: Option<PathBuf>,
    /// Prints the default setting as TOML.
    #[clap(long)]
    show_default_config: bool,
    /// Prints the JSON schema of the setting file.
    #[clap(long)]
    show_config_schema: bool,
    #[clap(flatten)]
    overrides: TeleopOverrides,
}

#[cfg(windows)]
fn main() {
    println!("{} is not supported on windows", env!("CARGO_BIN_NAME"));
}

#[cfg(unix)]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use teleop_keyboard::KeyboardReader;

    utils::init_tracing();
    let args = Args::parse();
    debug!("args: {args:?}");

    if args.show_default_config {
        print!("{}", toml::to_string(&TeleopConfig::default())?);
        return Ok(());
    }
    if args.show_config_schema {
        let schema = schemars::schema_for!(TeleopConfig);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let config_path = utils::get_config_path(args.config_path);
    let config = load_config(config_path.as_deref(), &args.overrides)?;
    info!(?config_path, "starting {}", env!("CARGO_BIN_NAME"));

    let keyboard = KeyboardReader::new().map_err(Error::Arci)?;

    let publisher = CommandPublisher::spawn(
        Arc::new(DummyMotionSink::new("cmd_vel")),
        config.publisher_config(),
    );
    let pose_cache = PoseCache::new(
        DummyTransformResolver::new(),
        &config.reference_frame,
        &config.robot_frame,
        config.lookup_timeout(),
    );
    let clients = NavigationClients {
        goal: Arc::new(DummyGoalSink::new()),
        cancel: Arc::new(DummyCancelSink::new()),
        costmaps: Arc::new(DummyCostmapClearer::new()),
        status: Arc::new(DummyStatusSink::new()),
    };
    let input_loop = InputLoop::new(&config, publisher, pose_cache, clients, io::stdout());

    let is_running = input_loop.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            is_running.store(false, Ordering::Relaxed);
        }
    });

    let result = input_loop.run(&keyboard).await;
    keyboard.stop();
    result.map_err(Error::from)?;
    Ok(())
}
