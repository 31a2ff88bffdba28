//! Dump the chat room OpenAPI document.
//!
//! Usage: `gen_openapi [OUTPUT]`. Writes `openapi.json` in the current
//! directory when no output path is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chatroom_backend::api::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("openapi.json"));

    let doc = ApiDoc::openapi();
    let json = doc.to_pretty_json().context("serializing OpenAPI document")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(&output, json).with_context(|| format!("writing {}", output.display()))?;

    let operations: usize = doc.paths.paths.values().map(|item| item.operations.len()).sum();
    println!(
        "{}: {} paths, {} operations",
        output.display(),
        doc.paths.paths.len(),
        operations
    );
    Ok(())
}
