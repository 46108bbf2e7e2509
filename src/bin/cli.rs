use anyhow::{anyhow, bail, Context, Result};
use crabselect::permissions::check_permission_detailed;
use crabselect::{
    init_logging_with, DefaultDeviceIdChooser, DeviceSelector, FacingMode, MediaPlatform,
    NativePlatform, SelectorConfig,
};
use std::env;
use std::path::PathBuf;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: crabselect-cli <list-devices|select|permission> [args]");
        std::process::exit(1);
    }

    let command = &args[1];
    match command.as_str() {
        "list-devices" => cmd_list_devices(&args).await,
        "select" => cmd_select(&args).await,
        "permission" => cmd_permission(&args),
        _ => {
            eprintln!("Unknown command: {}", command);
            std::process::exit(1);
        }
    }
}

async fn cmd_list_devices(args: &[String]) -> Result<()> {
    init_logging_with(&SelectorConfig::default().logging);

    let devices = NativePlatform::new()
        .list_media_devices()
        .await
        .context("failed to list devices")?;

    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string(&devices)?);
    } else {
        for d in devices {
            println!("{} [{}]: {}", d.device_id, d.kind, d.label);
        }
    }
    Ok(())
}

async fn cmd_select(args: &[String]) -> Result<()> {
    // Parse args: select [--facing <mode>] [--token <s>] [--config <path>] [--json]
    let mut facing = None;
    let mut token = None;
    let mut config_path = None;
    let mut json = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--facing" => {
                i += 1;
                let value = args.get(i).ok_or_else(|| anyhow!("--facing needs a value"))?;
                facing = Some(
                    FacingMode::parse(value)
                        .ok_or_else(|| anyhow!("facing mode must be user or environment"))?,
                );
            }
            "--token" => {
                i += 1;
                token = Some(args.get(i).ok_or_else(|| anyhow!("--token needs a value"))?.clone());
            }
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(
                    args.get(i).ok_or_else(|| anyhow!("--config needs a value"))?,
                ));
            }
            "--json" => json = true,
            other => bail!("Unknown argument: {}", other),
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => SelectorConfig::load_from_file(&path)?,
        None => SelectorConfig::load_or_default(),
    };
    config.validate().map_err(|e| anyhow!(e))?;
    init_logging_with(&config.logging);

    let facing_mode = facing.or(config.selection.facing_mode);
    let mut selector = DeviceSelector::from_config(NativePlatform::new(), &config.selection);
    if let Some(token) = token {
        selector = selector.with_camera_name_token(token);
    }

    log::info!(
        "Selecting {:?} camera with name token {:?}",
        facing_mode,
        selector.camera_name_token()
    );
    let device_id = selector
        .get_device_id(facing_mode, &DefaultDeviceIdChooser)
        .await?;

    if json {
        println!("{}", serde_json::json!({ "device_id": device_id }));
    } else {
        match device_id {
            Some(id) => println!("{}", id),
            None => println!("No suitable camera"),
        }
    }
    Ok(())
}

fn cmd_permission(args: &[String]) -> Result<()> {
    let info = check_permission_detailed();
    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string(&info)?);
    } else {
        println!("{}: {}", info.status, info.message);
    }
    Ok(())
}
