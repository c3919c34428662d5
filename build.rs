//! Cargo build script: bakes the host timing configuration into the crate.

mod build_core;
use crate::build_core::{
    conf::*, domain::TimerConfig, errors::BuildError, gen_config::run_config_gen,
};

use std::fs;
use std::path::PathBuf;

// The tick frequency is a property of the host system, not of the timer engine.
// It is read once here and emitted as a plain constant so the millisecond to tick
// conversion stays a `const fn` without runtime state.

//==================================================================================MAIN
fn main() -> Result<(), BuildError> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", CONFIG_PATH);
    println!("cargo:rerun-if-env-changed={}", CONFIG_PATH_ENV);
    println!("cargo:rerun-if-env-changed={}", TICK_FREQUENCY_ENV);

    // 1. Locate the configuration.
    // Priority order:
    //   1. VTIMER_CONFIG_PATH environment variable
    //   2. Default configuration shipped with the crate
    let default_config_path = PathBuf::from(CONFIG_PATH);
    let user_config_path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);

    let config_path = if let Some(path) = user_config_path {
        if path.exists() {
            println!("cargo:warning=Using custom vtimer configuration from {:?}", path);
            println!("cargo:rerun-if-changed={}", path.display());
            path
        } else {
            println!(
                "cargo:warning=Custom configuration path specified but file not found: {:?}",
                path
            );
            println!("cargo:warning=Falling back to the default vtimer configuration");
            default_config_path
        }
    } else {
        default_config_path
    };

    // 2. Load, apply the frequency override, validate.
    let config_string = fs::read_to_string(&config_path).map_err(|e| BuildError::ReadFile {
        path: config_path.clone(),
        source: e,
    })?;
    let mut config: TimerConfig = serde_json::from_str(&config_string)?;

    if let Ok(raw) = std::env::var(TICK_FREQUENCY_ENV) {
        config = config.with_frequency_override(&raw)?;
    }
    let config = config.validate()?;

    // 3. Write the generated constants into `OUT_DIR`.
    let buffer = run_config_gen(&config)?;
    let out_dir_str = std::env::var("OUT_DIR").map_err(|e| BuildError::OutDirErr { source: e })?;
    let config_file_path = PathBuf::from(out_dir_str).join(OUT_DIR_CONFIG_FILE_NAME);

    fs::write(&config_file_path, &buffer).map_err(|e| BuildError::WriteFile {
        path: config_file_path,
        source: e,
    })?;

    Ok(())
}
