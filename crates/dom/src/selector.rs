//! Compound selectors sufficient for popup wiring.
//!
//! Supported: `*`, `tag`, `#id`, `.class`, `[attr]`, `[attr=value]`,
//! `[attr="value"]`, any compound of those (`div.menu[open]`), and
//! comma-separated lists. Combinators are not supported; a selector that uses
//! one fails to parse rather than matching something unexpected.

use crate::types::Attribute;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrSelector {
    Exists(String),
    Equals(String, String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttrSelector>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList(Vec<CompoundSelector>);

impl SelectorList {
    // input: "div.menu, [eagle-popup=popup]"
    // output: Some([{tag: div, classes: [menu]}, {attributes: [Equals(eagle-popup, popup)]}])
    pub fn parse(input: &str) -> Option<Self> {
        let mut selectors = Vec::new();
        for part in split_top_level(input)? {
            selectors.push(parse_compound(part.trim())?);
        }
        if selectors.is_empty() {
            return None;
        }
        Some(Self(selectors))
    }

    pub fn selectors(&self) -> &[CompoundSelector] {
        &self.0
    }

    pub fn matches(&self, name: &str, attributes: &[Attribute]) -> bool {
        self.0.iter().any(|s| s.matches(name, attributes))
    }
}

fn get_attribute<'a>(attributes: &'a [Attribute], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_deref().unwrap_or(""))
}

impl CompoundSelector {
    pub fn matches(&self, name: &str, attributes: &[Attribute]) -> bool {
        if let Some(tag) = &self.tag {
            if !name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(want) = &self.id {
            if get_attribute(attributes, "id") != Some(want.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let classlist = get_attribute(attributes, "class").unwrap_or("");
            if !self
                .classes
                .iter()
                .all(|want| classlist.split_whitespace().any(|c| c == want))
            {
                return false;
            }
        }
        self.attributes.iter().all(|attr| match attr {
            AttrSelector::Exists(key) => get_attribute(attributes, key).is_some(),
            AttrSelector::Equals(key, want) => get_attribute(attributes, key) == Some(want.as_str()),
        })
    }
}

// Split on commas that sit outside brackets and quotes.
fn split_top_level(input: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.checked_sub(1)?,
            (None, ',') if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if quote.is_some() || depth != 0 {
        return None;
    }
    parts.push(&input[start..]);
    Some(parts)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    (!ident.is_empty()).then_some(ident)
}

fn parse_compound(s: &str) -> Option<CompoundSelector> {
    if s.is_empty() {
        return None;
    }
    let mut out = CompoundSelector::default();
    let mut chars = s.chars().peekable();
    if chars.peek() == Some(&'*') {
        chars.next();
    } else if chars.peek().is_some_and(|&c| is_ident_char(c)) {
        out.tag = Some(take_ident(&mut chars)?.to_ascii_lowercase());
    }
    while let Some(c) = chars.next() {
        match c {
            '#' => out.id = Some(take_ident(&mut chars)?),
            '.' => out.classes.push(take_ident(&mut chars)?),
            '[' => out.attributes.push(parse_attribute(&mut chars)?),
            _ => return None,
        }
    }
    Some(out)
}

// Called after the opening '['; consumes through the closing ']'.
fn parse_attribute(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<AttrSelector> {
    skip_spaces(chars);
    let name = take_ident(chars)?.to_ascii_lowercase();
    skip_spaces(chars);
    match chars.next()? {
        ']' => Some(AttrSelector::Exists(name)),
        '=' => {
            skip_spaces(chars);
            let value = match chars.peek().copied()? {
                q @ ('"' | '\'') => {
                    chars.next();
                    let mut value = String::new();
                    loop {
                        let c = chars.next()?;
                        if c == q {
                            break;
                        }
                        value.push(c);
                    }
                    value
                }
                _ => take_ident(chars)?,
            };
            skip_spaces(chars);
            (chars.next()? == ']').then_some(AttrSelector::Equals(name, value))
        }
        _ => None,
    }
}

fn skip_spaces(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
        chars.next();
    }
}
