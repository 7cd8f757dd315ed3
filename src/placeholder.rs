// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::borrow::Cow;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const SIGIL: char = '$';
const WILDCARD_SUFFIX: &str = ".*";

/// A template string of the form `{{$path}}`.
///
/// Anything that starts with `{{` and ends with `}}` is a placeholder, but only the
/// `{{$...}}` form carries a path. The others never resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub text: &'a str,
    pub inner_path: Option<&'a str>,
}

impl<'a> Placeholder<'a> {
    pub fn parse(text: &'a str) -> Option<Placeholder<'a>> {
        if text.len() < OPEN.len() + CLOSE.len() || !text.starts_with(OPEN) || !text.ends_with(CLOSE) {
            return None;
        }

        let inner = &text[OPEN.len()..text.len() - CLOSE.len()];
        let inner_path = inner.strip_prefix(SIGIL);
        Some(Placeholder { text, inner_path })
    }

    /// The path prefix in front of the first wildcard, naming the source array to expand over.
    pub fn list_key(&self) -> Option<&'a str> {
        let path = self.inner_path?;
        let end = path.find(WILDCARD_SUFFIX)?;
        Some(&path[..end])
    }
}

pub fn is_placeholder(text: &str) -> bool {
    Placeholder::parse(text).is_some()
}

/// Binds one iteration of a list expansion: `list_key.*` becomes `list_key.index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub list_key: String,
    pub index: usize,
}

impl Binding {
    pub fn new(list_key: &str, index: usize) -> Binding {
        Binding {
            list_key: list_key.to_string(),
            index,
        }
    }

    /// Rewrites the first occurrence of the bound wildcard in `text`. The match is on raw text, so
    /// key `a` also rewrites `data.*`.
    pub fn apply<'t>(&self, text: Cow<'t, str>) -> Cow<'t, str> {
        let pattern = format!("{}{}", self.list_key, WILDCARD_SUFFIX);
        match text.find(&pattern) {
            Some(start) => {
                let mut bound = String::with_capacity(text.len() + 8);
                bound.push_str(&text[..start]);
                bound.push_str(&self.list_key);
                bound.push('.');
                bound.push_str(&self.index.to_string());
                bound.push_str(&text[start + pattern.len()..]);
                Cow::Owned(bound)
            }
            None => text,
        }
    }
}

/// Applies bindings outermost first.
pub fn bind<'t>(text: &'t str, bindings: &[Binding]) -> Cow<'t, str> {
    bindings
        .iter()
        .fold(Cow::Borrowed(text), |text, binding| binding.apply(text))
}
