// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::fmt;

use anyhow::{anyhow, Error};
use chumsky::prelude::*;

/// One element of a dotted path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Looked up with deep-find semantics.
    Field(String),
    /// Text matching `^-?\d+$`. Kept as text so out-of-range values can still be reported.
    Index(String),
    Wildcard,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    pub segments: Vec<Segment>,
}

pub struct PathParser {
    parser: Box<dyn Parser<char, Vec<Segment>, Error = Simple<char>>>,
}

impl PathParser {
    pub fn new() -> PathParser {
        let parser = gen_path_parser();
        PathParser {
            parser: Box::new(parser),
        }
    }

    pub fn parse(&self, path_str: &str) -> Result<Path, Error> {
        let segments = self
            .parser
            .parse(path_str)
            .map_err(|errs| anyhow!("malformed path {:?} (errors={})", path_str, errs.len()))?;
        Ok(Path { segments })
    }
}

impl Default for PathParser {
    fn default() -> Self {
        Self::new()
    }
}

fn gen_path_parser() -> impl Parser<char, Vec<Segment>, Error = Simple<char>> {
    let segment = filter(|c: &char| *c != '.')
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(Segment::classify)
        .labelled("segment");

    segment.separated_by(just('.')).at_least(1).then_ignore(end())
}

impl Segment {
    pub fn classify(text: String) -> Segment {
        if text == "*" {
            Segment::Wildcard
        } else if is_index(&text) {
            Segment::Index(text)
        } else {
            Segment::Field(text)
        }
    }
}

fn is_index(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

impl Path {
    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(|segment| *segment == Segment::Wildcard)
    }

    /// Replaces every wildcard with `index`.
    pub fn bind_wildcards(self, index: usize) -> Path {
        let segments = self
            .segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Wildcard => Segment::Index(index.to_string()),
                segment => segment,
            })
            .collect();
        Path { segments }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(index) => f.write_str(index),
            Segment::Wildcard => f.write_str("*"),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
