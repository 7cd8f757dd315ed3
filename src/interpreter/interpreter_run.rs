// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::{
    cow_json::{Json, JsonMap},
    path::PathParser,
    placeholder::{bind, is_placeholder, Binding, Placeholder},
    resolver::{resolve, Resolution},
};

/// Counts of placeholder evaluations over one run. Values produced by a list expansion are walked
/// again afterwards, so a placeholder can be counted more than once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub resolved: usize,
    pub unresolved: usize,
    pub failed_expansions: usize,
}

pub struct InterpreterRun {
    path_parser: PathParser,
    stats: RunStats,
}

impl Default for InterpreterRun {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterRun {
    pub fn new() -> InterpreterRun {
        InterpreterRun {
            path_parser: PathParser::new(),
            stats: RunStats::default(),
        }
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn walk(&mut self, source: &Json, template: &Json) -> Json {
        match template {
            Json::Object(entries) => self.walk_object(source, entries),
            Json::Array(values) => self.walk_array(source, values),
            Json::Null | Json::Bool(_) | Json::Number(_) | Json::String(_) => template.clone(),
        }
    }

    fn walk_object(&mut self, source: &Json, entries: &JsonMap) -> Json {
        let mut output = JsonMap::new();
        for (key, value) in entries.iter() {
            let value = match value {
                Json::String(text) if is_placeholder(text) => self.eval_leaf(source, text, &[]),
                Json::Array(values) => {
                    let expanded = self.expand(source, values, &[]);
                    let walked = expanded.iter().map(|element| self.walk(source, element)).collect();
                    Json::array(walked)
                }
                _ => self.walk(source, value),
            };
            output.insert(key.clone(), value);
        }
        Json::object(output)
    }

    // Each expanded element is walked once per item of the source: array elements or object
    // values. A scalar source has no items, so nothing is emitted.
    fn walk_array(&mut self, source: &Json, values: &[Json]) -> Json {
        let expanded = self.expand(source, values, &[]);
        let items: Vec<&Json> = match source {
            Json::Array(items) => items.iter().collect(),
            Json::Object(entries) => entries.values().collect(),
            Json::Null | Json::Bool(_) | Json::Number(_) | Json::String(_) => Vec::new(),
        };

        let mut output = Vec::with_capacity(expanded.len() * items.len());
        for element in &expanded {
            for item in &items {
                output.push(self.walk(item, element));
            }
        }
        Json::array(output)
    }

    pub fn eval_leaf(&mut self, source: &Json, text: &str, bindings: &[Binding]) -> Json {
        let bound = bind(text, bindings);
        let Some(placeholder) = Placeholder::parse(&bound) else {
            return Json::string(text);
        };

        let Some(inner_path) = placeholder.inner_path else {
            debug!(placeholder = %bound, "placeholder has no path");
            return self.unresolved(bound);
        };

        let path = match self.path_parser.parse(inner_path) {
            Ok(path) => path,
            Err(err) => {
                debug!(placeholder = %bound, "{}", err);
                return self.unresolved(bound);
            }
        };

        // A wildcard with no list expansion around it falls back to the first element.
        let path = match path.has_wildcard() {
            true => {
                debug!(placeholder = %bound, "unbound wildcard, using index 0");
                path.bind_wildcards(0)
            }
            false => path,
        };

        match resolve(&path, source) {
            Resolution::Found(value) => {
                self.stats.resolved += 1;
                value.clone()
            }
            Resolution::Missing { segment } => {
                debug!(placeholder = %bound, segment = %segment, "placeholder unresolved");
                self.unresolved(bound)
            }
        }
    }

    fn unresolved(&mut self, text: Cow<str>) -> Json {
        self.stats.unresolved += 1;
        Json::string(text.into_owned())
    }

    /// Expands a template array. Elements bound to a list key fan out once per item of the source
    /// array it names; all other elements produce a single value.
    pub fn expand(&mut self, source: &Json, template: &[Json], bindings: &[Binding]) -> Vec<Json> {
        let mut output = Vec::with_capacity(template.len());
        for element in template {
            match Self::list_key(element, bindings) {
                Some(list_key) => self.expand_element(source, element, &list_key, bindings, &mut output),
                None => output.push(self.process(source, element, bindings)),
            }
        }
        output
    }

    fn expand_element(
        &mut self,
        source: &Json,
        element: &Json,
        list_key: &str,
        bindings: &[Binding],
        output: &mut Vec<Json>,
    ) {
        let Some(len) = self.list_len(source, list_key) else {
            self.stats.failed_expansions += 1;
            return;
        };

        debug!(list_key, len, "expanding list");

        let mut bindings = bindings.to_vec();
        bindings.push(Binding::new(list_key, 0));
        for index in 0..len {
            if let Some(binding) = bindings.last_mut() {
                binding.index = index;
            }
            output.push(self.process(source, element, &bindings));
        }
    }

    fn list_len(&self, source: &Json, list_key: &str) -> Option<usize> {
        let path = match self.path_parser.parse(list_key) {
            Ok(path) => path,
            Err(err) => {
                warn!(list_key, "list key is not a valid path: {}", err);
                return None;
            }
        };

        match resolve(&path, source) {
            Resolution::Found(Json::Array(items)) => Some(items.len()),
            Resolution::Found(other) => {
                warn!(list_key, found = other.type_name(), "list key does not name an array");
                None
            }
            Resolution::Missing { segment } => {
                warn!(list_key, segment = %segment, "list key not found in source");
                None
            }
        }
    }

    /// Evaluates one template array element with `bindings` applied to every placeholder in it.
    fn process(&mut self, source: &Json, element: &Json, bindings: &[Binding]) -> Json {
        match element {
            Json::String(text) if is_placeholder(text) => self.eval_leaf(source, text, bindings),
            Json::Object(entries) => {
                let mut output = JsonMap::new();
                for (key, value) in entries.iter() {
                    output.insert(key.clone(), self.process(source, value, bindings));
                }
                Json::object(output)
            }
            Json::Array(values) => Json::array(self.expand(source, values, bindings)),
            Json::Null | Json::Bool(_) | Json::Number(_) | Json::String(_) => element.clone(),
        }
    }

    fn list_key(element: &Json, bindings: &[Binding]) -> Option<String> {
        match element {
            Json::String(text) => Self::placeholder_list_key(text, bindings),
            // The first placeholder field that has a list key decides for the whole object.
            Json::Object(entries) => entries.values().find_map(|value| match value {
                Json::String(text) => Self::placeholder_list_key(text, bindings),
                _ => None,
            }),
            Json::Null | Json::Bool(_) | Json::Number(_) | Json::Array(_) => None,
        }
    }

    fn placeholder_list_key(text: &str, bindings: &[Binding]) -> Option<String> {
        let bound = bind(text, bindings);
        let placeholder = Placeholder::parse(&bound)?;
        placeholder.list_key().map(str::to_string)
    }
}
