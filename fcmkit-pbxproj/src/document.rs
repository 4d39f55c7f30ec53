//! Lossless node tree and the build-settings editing API.
//!
//! Every node keeps the trivia (whitespace and comments) that precedes each of
//! its tokens. Serializing an unmodified [`Document`] reproduces the input byte
//! for byte; edits only touch the nodes they replace or append.
//!
//! String values are kept as raw tokens, quotes included: a setting written as
//! `PRODUCT_NAME = "$(TARGET_NAME)";` has the value `"$(TARGET_NAME)"` with the
//! quotes. Keys and configuration names are compared unquoted.

use crate::error::Result;
use crate::parser;
use camino::Utf8Path;
use fs_err as fs;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const BUILD_CONFIGURATION_ISA: &str = "XCBuildConfiguration";

/// A parsed `project.pbxproj`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Value,
    trailing: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Bare word, quoted string or `<data>` literal.
    String(Scalar),
    Array(Array),
    Dict(Dict),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    pub(crate) leading: String,
    pub(crate) raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array {
    pub(crate) open: String,
    pub(crate) items: Vec<ArrayItem>,
    pub(crate) close: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArrayItem {
    pub value: Value,
    /// Trivia before the separating comma, if there is one.
    pub comma: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dict {
    pub(crate) open: String,
    pub(crate) entries: Vec<Entry>,
    pub(crate) close: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub key: Scalar,
    pub eq: String,
    pub value: Value,
    pub semi: String,
}

/// The value of a build setting: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildValue {
    Single(String),
    List(Vec<String>),
}

impl BuildValue {
    /// A single value becomes a one-element list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            BuildValue::Single(s) => vec![s],
            BuildValue::List(items) => items,
        }
    }
}

impl From<&str> for BuildValue {
    fn from(s: &str) -> Self {
        BuildValue::Single(s.to_string())
    }
}

impl Scalar {
    fn new(leading: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            leading: leading.into(),
            raw: raw.into(),
        }
    }

    /// The token exactly as written, quotes included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The string with surrounding quotes removed and escapes resolved.
    pub fn unquoted(&self) -> Cow<'_, str> {
        unquote(&self.raw)
    }
}

impl Value {
    fn leading(&self) -> &str {
        match self {
            Value::String(s) => &s.leading,
            Value::Array(a) => &a.open,
            Value::Dict(d) => &d.open,
        }
    }

    fn set_leading(&mut self, leading: String) {
        match self {
            Value::String(s) => s.leading = leading,
            Value::Array(a) => a.open = leading,
            Value::Dict(d) => d.open = leading,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as it appears in the file, without its leading trivia.
    pub fn to_raw_string(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out[self.leading().len()..].to_string()
    }

    fn to_build_value(&self) -> BuildValue {
        match self {
            Value::Array(a) => BuildValue::List(
                a.items
                    .iter()
                    .map(|item| match &item.value {
                        Value::String(s) => s.raw.clone(),
                        other => other.to_raw_string(),
                    })
                    .collect(),
            ),
            Value::String(s) => BuildValue::Single(s.raw.clone()),
            Value::Dict(_) => BuildValue::Single(self.to_raw_string()),
        }
    }

    /// Build a fresh node for `value`, formatted for an entry indented by `indent`.
    fn from_build_value(value: &BuildValue, indent: &str) -> Self {
        match value {
            BuildValue::Single(s) => Value::String(Scalar::new(" ", s.as_str())),
            BuildValue::List(items) => Value::Array(Array {
                open: " ".to_string(),
                items: items
                    .iter()
                    .map(|s| ArrayItem {
                        value: Value::String(Scalar::new(format!("{indent}\t"), s.as_str())),
                        comma: Some(String::new()),
                    })
                    .collect(),
                close: indent.to_string(),
            }),
        }
    }

    fn write(&self, out: &mut String) {
        match self {
            Value::String(s) => {
                out.push_str(&s.leading);
                out.push_str(&s.raw);
            }
            Value::Array(a) => {
                out.push_str(&a.open);
                out.push('(');
                for item in &a.items {
                    item.value.write(out);
                    if let Some(trivia) = &item.comma {
                        out.push_str(trivia);
                        out.push(',');
                    }
                }
                out.push_str(&a.close);
                out.push(')');
            }
            Value::Dict(d) => {
                out.push_str(&d.open);
                out.push('{');
                for e in &d.entries {
                    out.push_str(&e.key.leading);
                    out.push_str(&e.key.raw);
                    out.push_str(&e.eq);
                    out.push('=');
                    e.value.write(out);
                    out.push_str(&e.semi);
                    out.push(';');
                }
                out.push_str(&d.close);
                out.push('}');
            }
        }
    }
}

impl Dict {
    /// Value of the last entry named `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key.unquoted() == key)
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .rev()
            .find(|e| e.key.unquoted() == key)
            .map(|e| &mut e.value)
    }

    /// Unquoted string value of `key`, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).and_then(Value::as_scalar).map(Scalar::unquoted)
    }

    pub fn keys(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.entries.iter().map(|e| e.key.unquoted())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Trivia used in front of a newly appended key.
    fn entry_indent(&self) -> String {
        if let Some(last) = self.entries.last() {
            return line_indent(&last.key.leading).to_string();
        }
        match self.close.rfind('\n') {
            Some(idx) => format!("{}\t", &self.close[idx..]),
            None => " ".to_string(),
        }
    }

    /// Append a new entry, even if `key` already exists.
    fn push(&mut self, key: &str, value: &BuildValue) {
        let indent = self.entry_indent();
        let node = Value::from_build_value(value, &indent);
        self.entries.push(Entry {
            key: Scalar::new(indent, quote_if_needed(key)),
            eq: " ".to_string(),
            value: node,
            semi: String::new(),
        });
    }

    /// Replace every entry named `key`; append one when there is none.
    fn set(&mut self, key: &str, value: &BuildValue) {
        let mut found = false;
        for e in self.entries.iter_mut().filter(|e| e.key.unquoted() == key) {
            let indent = line_indent(&e.key.leading).to_string();
            let mut node = Value::from_build_value(value, &indent);
            node.set_leading(e.value.leading().to_string());
            e.value = node;
            found = true;
        }
        if !found {
            self.push(key, value);
        }
    }
}

impl Document {
    pub fn parse(src: &str) -> Result<Self> {
        let parsed = parser::parse(src)?;
        Ok(Self {
            root: parsed.root,
            trailing: parsed.trailing,
        })
    }

    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        debug!(%path, "parsing project file");
        let src = fs::read_to_string(path)?;
        Self::parse(&src)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The `objects` dictionary holding every project object.
    pub fn objects(&self) -> Option<&Dict> {
        self.root.as_dict()?.get("objects")?.as_dict()
    }

    fn objects_mut(&mut self) -> Option<&mut Dict> {
        self.root.as_dict_mut()?.get_mut("objects")?.as_dict_mut()
    }

    /// Names of all `XCBuildConfiguration` objects, in file order.
    pub fn configuration_names(&self) -> Vec<String> {
        self.build_configurations(None)
            .filter_map(|cfg| cfg.get_str("name").map(Cow::into_owned))
            .collect()
    }

    fn build_configurations<'a>(&'a self, build: Option<&'a str>) -> impl Iterator<Item = &'a Dict> {
        self.objects()
            .into_iter()
            .flat_map(|objects| objects.entries.iter())
            .filter_map(|e| e.value.as_dict())
            .filter(move |cfg| is_configuration(cfg, build))
    }

    fn for_each_build_settings_mut(&mut self, build: Option<&str>, mut f: impl FnMut(&mut Dict)) {
        let Some(objects) = self.objects_mut() else {
            return;
        };
        for e in objects.entries.iter_mut() {
            let Some(cfg) = e.value.as_dict_mut() else {
                continue;
            };
            if !is_configuration(cfg, build) {
                continue;
            }
            if let Some(settings) = cfg.get_mut("buildSettings").and_then(Value::as_dict_mut) {
                f(settings);
            }
        }
    }

    /// Value of `prop` from the last matching configuration that defines it.
    ///
    /// `build` restricts the search to configurations with that name; `None`
    /// searches all of them.
    pub fn get_build_property(&self, prop: &str, build: Option<&str>) -> Option<BuildValue> {
        self.build_configurations(build)
            .filter_map(|cfg| cfg.get("buildSettings").and_then(Value::as_dict))
            .filter_map(|settings| settings.get(prop))
            .last()
            .map(Value::to_build_value)
    }

    /// Every entry for `prop` across matching configurations, duplicates included.
    pub fn build_property_values(&self, prop: &str, build: Option<&str>) -> Vec<BuildValue> {
        self.build_configurations(build)
            .filter_map(|cfg| cfg.get("buildSettings").and_then(Value::as_dict))
            .flat_map(|settings| {
                settings
                    .entries
                    .iter()
                    .filter(|e| e.key.unquoted() == prop)
                    .map(|e| e.value.to_build_value())
            })
            .collect()
    }

    /// Set `prop` on every matching configuration, replacing existing entries.
    pub fn update_build_property(&mut self, prop: &str, value: &BuildValue, build: Option<&str>) {
        self.for_each_build_settings_mut(build, |settings| settings.set(prop, value));
    }

    /// Append `prop` to every matching configuration without looking for an
    /// existing entry, so a configuration that already defines it ends up with
    /// two.
    pub fn add_build_property(&mut self, prop: &str, value: &BuildValue, build: Option<&str>) {
        self.for_each_build_settings_mut(build, |settings| settings.push(prop, value));
    }
}

impl FromStr for Document {
    type Err = crate::error::PbxprojError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.root.write(&mut out);
        out.push_str(&self.trailing);
        f.write_str(&out)
    }
}

fn is_configuration(cfg: &Dict, build: Option<&str>) -> bool {
    if cfg.get_str("isa").as_deref() != Some(BUILD_CONFIGURATION_ISA) {
        return false;
    }
    match build {
        Some(name) => cfg.get_str("name").as_deref() == Some(name),
        None => true,
    }
}

/// The part of a trivia string from its last newline on, or a single space.
fn line_indent(trivia: &str) -> &str {
    match trivia.rfind('\n') {
        Some(idx) => &trivia[idx..],
        None => " ",
    }
}

fn is_bare_safe(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.' | '-'))
        && !s.contains("//")
        && !s.contains("/*")
}

fn quote_if_needed(s: &str) -> Cow<'_, str> {
    if is_bare_safe(s) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")))
    }
}

/// Strip surrounding double quotes and resolve backslash escapes.
pub fn unquote(raw: &str) -> Cow<'_, str> {
    let Some(inner) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        return Cow::Borrowed(raw);
    };
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}
