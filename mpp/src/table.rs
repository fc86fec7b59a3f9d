use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

// ----------------------------------------------------------------------------
// Formal parameter

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub default: Option<String>,
}

impl Param {
    /// `&E=AREG` is a keyword parameter with default `AREG`, `&O` is positional.
    pub fn parse(word: &str) -> Self {
        match word.split_once('=') {
            Some((name, default)) => Param {
                name: name.to_string(),
                default: Some(default.to_string()),
            },
            None => Param {
                name: word.to_string(),
                default: None,
            },
        }
    }

    pub fn is_positional(&self) -> bool {
        self.default.is_none()
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{}={}", self.name, default),
            None => write!(f, "{}", self.name),
        }
    }
}

// ----------------------------------------------------------------------------
// Macro Name Table

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroDef {
    pub name: String,
    pub params: Vec<Param>,
    /// First body line in the MDT
    pub mdt_index: usize,
    /// Source line of the header
    pub line: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Mnt(IndexMap<String, MacroDef>);

impl Mnt {
    /// Returns the previous definition when `def.name` is already taken.
    /// The table keeps the earlier one.
    pub fn insert(&mut self, def: MacroDef) -> Option<&MacroDef> {
        if self.0.contains_key(&def.name) {
            return self.0.get(&def.name);
        }
        self.0.insert(def.name.clone(), def);
        None
    }

    pub fn get(&self, name: &str) -> Option<&MacroDef> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacroDef> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Mnt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for def in self.iter() {
            let params: Vec<String> = def.params.iter().map(|p| p.to_string()).collect();
            writeln!(f, "{:<10} {:>4}  {}", def.name, def.mdt_index, params.join(", "))?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Macro Definition Table

/// Bodies of every macro, back to back. Each body ends with its closing marker line.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Mdt(Vec<String>);

impl Mdt {
    pub fn push(&mut self, line: String) {
        self.0.push(line);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(|s| s.as_str())
    }

    /// Body lines starting at `start`, up to but excluding the line equal to `end`.
    pub fn body<'a>(&'a self, start: usize, end: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .skip(start)
            .map(|s| s.as_str())
            .take_while(move |line| *line != end)
    }
}

impl fmt::Display for Mdt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, line) in self.0.iter().enumerate() {
            writeln!(f, "{:>4}  {}", idx, line)?;
        }
        Ok(())
    }
}
