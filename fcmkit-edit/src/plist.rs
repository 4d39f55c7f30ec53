//! XML property list model.
//!
//! Reading goes through `roxmltree` into owned values. Writing produces the
//! layout Xcode itself emits: XML declaration, Apple DOCTYPE and tab
//! indentation. Dictionaries keep their key order, so a parse/serialize cycle
//! of an Xcode-generated plist reproduces it.
//!
//! Integers, reals, dates and data blobs are kept as their literal text; the
//! patches never need to interpret them.

use thiserror::Error;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n<plist version=\"1.0\">\n";

#[derive(Debug, Error)]
pub enum PlistError {
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),

    /// Well-formed XML that is not a property list.
    #[error("{0}")]
    Structure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Boolean(bool),
    Integer(String),
    Real(String),
    Date(String),
    Data(String),
    Array(Vec<Value>),
    Dict(Dict),
}

/// Dictionary with insertion-ordered keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dict {
    entries: Vec<(String, Value)>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(Value::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    /// Set `key`, replacing in place or appending. Returns whether the
    /// dictionary changed.
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) if *existing == value => false,
            Some((_, existing)) => {
                *existing = value;
                true
            }
            None => {
                self.entries.push((key.to_string(), value));
                true
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed property list document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plist {
    pub root: Value,
}

impl Plist {
    pub fn parse(src: &str) -> Result<Self, PlistError> {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(src, opts)?;
        let plist = doc.root_element();
        if plist.tag_name().name() != "plist" {
            return Err(PlistError::Structure(format!(
                "root element is <{}>, expected <plist>",
                plist.tag_name().name()
            )));
        }
        let Some(node) = plist.children().find(|n| n.is_element()) else {
            return Err(PlistError::Structure("<plist> has no value".to_string()));
        };
        Ok(Self {
            root: parse_value(node)?,
        })
    }

    /// The top-level dictionary, when the root is one.
    pub fn dict(&self) -> Option<&Dict> {
        match &self.root {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn dict_mut(&mut self) -> Option<&mut Dict> {
        match &mut self.root {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::from(XML_HEADER);
        write_value(&mut out, &self.root, 0);
        out.push_str("</plist>\n");
        out
    }
}

fn parse_value(node: roxmltree::Node<'_, '_>) -> Result<Value, PlistError> {
    let text = || node.text().unwrap_or("").to_string();
    let value = match node.tag_name().name() {
        "string" => Value::String(text()),
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        "integer" => Value::Integer(text().trim().to_string()),
        "real" => Value::Real(text().trim().to_string()),
        "date" => Value::Date(text().trim().to_string()),
        "data" => Value::Data(text().split_whitespace().collect()),
        "array" => Value::Array(
            node.children()
                .filter(|n| n.is_element())
                .map(parse_value)
                .collect::<Result<_, _>>()?,
        ),
        "dict" => Value::Dict(parse_dict(node)?),
        other => {
            return Err(PlistError::Structure(format!(
                "unexpected <{other}> at byte {}",
                node.range().start
            )));
        }
    };
    Ok(value)
}

fn parse_dict(node: roxmltree::Node<'_, '_>) -> Result<Dict, PlistError> {
    let mut dict = Dict::new();
    let mut children = node.children().filter(|n| n.is_element());
    while let Some(key) = children.next() {
        if key.tag_name().name() != "key" {
            return Err(PlistError::Structure(format!(
                "expected <key> in <dict>, found <{}>",
                key.tag_name().name()
            )));
        }
        let name = key.text().unwrap_or("").to_string();
        let Some(value) = children.next() else {
            return Err(PlistError::Structure(format!("key {name:?} has no value")));
        };
        dict.entries.push((name, parse_value(value)?));
    }
    Ok(dict)
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    let indent = "\t".repeat(depth);
    match value {
        Value::String(s) => out.push_str(&format!("{indent}<string>{}</string>\n", escape(s))),
        Value::Boolean(true) => out.push_str(&format!("{indent}<true/>\n")),
        Value::Boolean(false) => out.push_str(&format!("{indent}<false/>\n")),
        Value::Integer(s) => out.push_str(&format!("{indent}<integer>{s}</integer>\n")),
        Value::Real(s) => out.push_str(&format!("{indent}<real>{s}</real>\n")),
        Value::Date(s) => out.push_str(&format!("{indent}<date>{s}</date>\n")),
        Value::Data(s) => out.push_str(&format!("{indent}<data>{s}</data>\n")),
        Value::Array(items) if items.is_empty() => out.push_str(&format!("{indent}<array/>\n")),
        Value::Array(items) => {
            out.push_str(&format!("{indent}<array>\n"));
            for item in items {
                write_value(out, item, depth + 1);
            }
            out.push_str(&format!("{indent}</array>\n"));
        }
        Value::Dict(d) if d.is_empty() => out.push_str(&format!("{indent}<dict/>\n")),
        Value::Dict(d) => {
            out.push_str(&format!("{indent}<dict>\n"));
            for (k, v) in &d.entries {
                out.push_str(&format!("{indent}\t<key>{}</key>\n", escape(k)));
                write_value(out, v, depth + 1);
            }
            out.push_str(&format!("{indent}</dict>\n"));
        }
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
