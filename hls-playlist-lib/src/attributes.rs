//! Attribute-list tokenizer
//!
//! Splits the `KEY=VALUE,KEY="VALUE"` part of a tag line into named
//! attributes. Commas inside double-quoted values are literal.
//!
//! The tokenizer is strict: a token without `=`, an empty token, an empty
//! name, an unterminated quoted string or a repeated name fails the line.

use crate::error::{PlaylistError, Result};

/// One `NAME=VALUE` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Upper-cased attribute name.
    pub name: String,
    /// Trimmed value, surrounding quotes stripped.
    pub value: String,
    /// Whether the value was written as a quoted string.
    pub quoted: bool,
}

/// A tokenized attribute list, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    attributes: Vec<Attribute>,
}

impl AttributeList {
    /// Tokenize `input`. `tag` is only used for error context.
    pub fn parse(tag: &str, input: &str) -> Result<AttributeList> {
        let mut attributes: Vec<Attribute> = Vec::new();

        for token in split_outside_quotes(tag, input)? {
            let token = token.trim();
            if token.is_empty() {
                return Err(PlaylistError::malformed(tag, "empty attribute"));
            }
            let (name, value) = token.split_once('=').ok_or_else(|| {
                PlaylistError::malformed(tag, format!("attribute without '=': {:?}", token))
            })?;

            let name = name.trim().to_ascii_uppercase();
            if name.is_empty() {
                return Err(PlaylistError::malformed(tag, "empty attribute name"));
            }
            if attributes.iter().any(|a| a.name == name) {
                return Err(PlaylistError::malformed(
                    tag,
                    format!("duplicate attribute {}", name),
                ));
            }

            let value = value.trim();
            let (value, quoted) = match value.strip_prefix('"') {
                Some(rest) => match rest.strip_suffix('"') {
                    Some(inner) => (inner, true),
                    None => {
                        return Err(PlaylistError::malformed(
                            tag,
                            format!("unterminated quoted string in {}", name),
                        ))
                    }
                },
                None => (value, false),
            };

            attributes.push(Attribute {
                name,
                value: value.to_string(),
                quoted,
            });
        }

        Ok(AttributeList { attributes })
    }

    /// Value of an attribute, looked up case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.find(name).map(|a| a.value.as_str())
    }

    /// Whether the attribute was a quoted string. False when absent.
    pub fn is_quoted(&self, name: &str) -> bool {
        self.find(name).map(|a| a.quoted).unwrap_or(false)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn find(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

// helper.
fn split_outside_quotes<'a>(tag: &str, input: &'a str) -> Result<Vec<&'a str>> {
    let mut tokens = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                tokens.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if in_quotes {
        return Err(PlaylistError::malformed(tag, "unbalanced double quotes"));
    }
    tokens.push(&input[start..]);

    Ok(tokens)
}
