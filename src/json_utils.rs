use std::{fs, path::Path};

use anyhow::{Context, Error};

use crate::cow_json::Json;

pub fn json_emit_to_string(json: &Json, compact: bool) -> Result<String, Error> {
    match compact {
        true => json.to_json_string(),
        false => json.to_json_string_pretty(),
    }
}

pub fn json_read_file(filename: &Path) -> Result<String, Error> {
    fs::read_to_string(filename).with_context(|| format!("cannot read {}", filename.display()))
}

pub fn json_write_file(out: &str, filename: &Path) -> Result<(), Error> {
    fs::write(filename, format!("{}\n", out)).with_context(|| format!("cannot write {}", filename.display()))
}
