// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use anyhow::{Context, Error};
use tracing::debug;

use crate::{
    cow_json::{parse_json_str, Json},
    interpreter::{interpret, RunStats},
    json_utils::json_emit_to_string,
};

pub fn process_json_template_str(source_string: &str, template_string: &str, compact: bool) -> Result<String, Error> {
    let source = parse_json_str(source_string).context("source is not valid JSON")?;
    let template = parse_json_str(template_string).context("template is not valid JSON")?;
    let output = process_json_template(&source, &template);
    let out_str = json_emit_to_string(&output, compact)?;
    Ok(out_str)
}

pub fn process_json_template(source: &Json, template: &Json) -> Json {
    let interpretation = interpret(template, source);
    log_stats(interpretation.stats);
    interpretation.output
}

fn log_stats(stats: RunStats) {
    debug!(
        resolved = stats.resolved,
        unresolved = stats.unresolved,
        failed_expansions = stats.failed_expansions,
        "template processed"
    );
}
