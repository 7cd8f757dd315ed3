// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::{
    cow_json::Json,
    path::{Path, Segment},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a Json),
    /// Navigation stopped at `segment`.
    Missing { segment: String },
}

pub fn resolve<'a>(path: &Path, root: &'a Json) -> Resolution<'a> {
    let mut node = root;
    for segment in &path.segments {
        let next = match segment {
            Segment::Index(text) => index_into(node, text),
            Segment::Field(name) => find_field(node, name),
            Segment::Wildcard => find_field(node, "*"),
        };

        match next {
            Some(next) => node = next,
            None => {
                debug!(path = %path, segment = %segment, found = node.type_name(), "path not found");
                return Resolution::Missing {
                    segment: segment.to_string(),
                };
            }
        }
    }

    Resolution::Found(node)
}

fn index_into<'a>(node: &'a Json, text: &str) -> Option<&'a Json> {
    let list = node.as_array()?;
    // Negative and oversized indices fail to parse and so are out of range.
    let index = text.parse::<usize>().ok()?;
    list.get(index)
}

/// Finds the first object in pre-order over `node` holding `name` and returns that field's value.
pub fn find_field<'a>(node: &'a Json, name: &str) -> Option<&'a Json> {
    match node {
        Json::Object(entries) => {
            if let Some(value) = entries.get(name) {
                return Some(value);
            }
            entries.values().find_map(|child| find_field(child, name))
        }
        Json::Array(values) => values.iter().find_map(|child| find_field(child, name)),
        Json::Null | Json::Bool(_) | Json::Number(_) | Json::String(_) => None,
    }
}
