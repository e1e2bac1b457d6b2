//! Writes the bundled demonstration artifacts to `models/`.
//!
//! Run once before starting the server in a fresh checkout:
//!
//! ```sh
//! cargo run --bin gen_demo_model
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;

use cardioinsight_server::logic::model::demo;

fn main() -> anyhow::Result<()> {
    let dir = Path::new("models");
    fs::create_dir_all(dir).context("creating models directory")?;

    let forest = demo::demo_forest();
    let scaler = demo::demo_scaler();

    let forest_path = dir.join("forest.json");
    fs::write(&forest_path, serde_json::to_string_pretty(&forest)?)
        .with_context(|| format!("writing {}", forest_path.display()))?;
    println!("wrote {}", forest_path.display());

    let scaler_path = dir.join("scaler.json");
    fs::write(&scaler_path, serde_json::to_string_pretty(&scaler)?)
        .with_context(|| format!("writing {}", scaler_path.display()))?;
    println!("wrote {}", scaler_path.display());

    Ok(())
}
