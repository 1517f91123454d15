use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use tokenizers::Tokenizer;

const SINGLE_WEIGHTS_FILE: &str = "model.safetensors";
const WEIGHTS_INDEX_FILE: &str = "model.safetensors.index.json";

pub fn load_tokenizer(tokenizer_path: &Path) -> io::Result<Tokenizer> {
    Tokenizer::from_file(tokenizer_path).map_err(io::Error::other)
}

/// Lists the safetensors files making up the model weights.
///
/// Prefers a single `model.safetensors`; otherwise reads the shard names from
/// `model.safetensors.index.json`.
pub fn weight_files(model_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let single = model_dir.join(SINGLE_WEIGHTS_FILE);
    if single.is_file() {
        return Ok(vec![single]);
    }

    let index_path = model_dir.join(WEIGHTS_INDEX_FILE);
    if !index_path.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "Missing {SINGLE_WEIGHTS_FILE} or {WEIGHTS_INDEX_FILE} in {}",
                model_dir.display()
            ),
        ));
    }

    let index: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&index_path)?)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let weight_map = index
        .get("weight_map")
        .and_then(|v| v.as_object())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} has no weight_map object", index_path.display()),
            )
        })?;

    let shards: BTreeSet<&str> = weight_map.values().filter_map(|v| v.as_str()).collect();
    if shards.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} lists no shards", index_path.display()),
        ));
    }

    let files: Vec<PathBuf> = shards.into_iter().map(|s| model_dir.join(s)).collect();
    if let Some(missing) = files.iter().find(|f| !f.is_file()) {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Missing weight shard {}", missing.display()),
        ));
    }

    Ok(files)
}
