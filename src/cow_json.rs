// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Provides a cheaply clonable, order-preserving JSON value.

mod serde_impl;


use std::sync::Arc;

use anyhow::Error;
use hashlink::LinkedHashMap;
use serde_json::Number;

pub type JsonMap = LinkedHashMap<String, Json>;

#[derive(Clone, PartialEq, Debug)]
pub enum Json {
    Null,
    Bool(bool),
    Number(Number),
    String(Arc<String>),
    Array(Arc<Vec<Json>>),
    // Keys keep the order they were inserted in.
    Object(Arc<JsonMap>),
}

pub fn parse_json_str(input: &str) -> Result<Json, Error> {
    let json = serde_json::from_str(input)?;
    Ok(json)
}

impl Json {
    pub fn string(value: impl Into<String>) -> Json {
        Json::String(Arc::new(value.into()))
    }

    pub fn array(values: Vec<Json>) -> Json {
        Json::Array(Arc::new(values))
    }

    pub fn object(entries: JsonMap) -> Json {
        Json::Object(Arc::new(entries))
    }

    pub fn as_array(&self) -> Option<&[Json]> {
        match self {
            Json::Array(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Json::Null => "null",
            Json::Bool(_) => "bool",
            Json::Number(_) => "number",
            Json::String(_) => "string",
            Json::Array(_) => "array",
            Json::Object(_) => "object",
        }
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
