use std::path::PathBuf;

use contour_logo::{generate, LogoConfig};

const USAGE: &str = "Usage: create_logo [config=<file.json>] [coefficients=<file>] [font=<file.ttf>] [output=<dir>]";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    //
    // The JSON config, if any, is loaded first so the other options override it
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "help" || a == "--help" || a == "-h") {
        eprintln!("{USAGE}");
        std::process::exit(0);
    }

    let mut config = match args.iter().find_map(|a| a.strip_prefix("config=")) {
        Some(path) => LogoConfig::from_json(path).unwrap_or_else(|err| {
            log::error!("{err}");
            std::process::exit(1);
        }),
        None => LogoConfig::default(),
    };

    for arg in &args {
        if let Some(option) = arg.strip_prefix("coefficients=") {
            config.input_filename = PathBuf::from(option);
        } else if let Some(option) = arg.strip_prefix("font=") {
            config.font_path = PathBuf::from(option);
        } else if let Some(option) = arg.strip_prefix("output=") {
            config.output_dir = PathBuf::from(option);
        } else if !arg.starts_with("config=") {
            eprintln!("Unknown option: {arg}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    match generate(&config) {
        Ok(written) => log::info!("Wrote {} files", written.len()),
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    }
}
