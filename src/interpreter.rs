// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod interpreter_run;


use crate::cow_json::Json;

pub use interpreter_run::RunStats;

use interpreter_run::InterpreterRun;

pub struct Interpretation {
    pub output: Json,
    pub stats: RunStats,
}

/// Evaluates `template` against `source`. Never fails: unresolved placeholders are left in place.
pub fn interpret(template: &Json, source: &Json) -> Interpretation {
    let mut interpreter_run = InterpreterRun::new();
    let output = interpreter_run.walk(source, template);
    Interpretation {
        output,
        stats: interpreter_run.stats(),
    }
}
