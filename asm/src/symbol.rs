use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// `None` until resolved
    pub addr: Option<u16>,
    /// Line of the defining label
    pub defined_at: Option<usize>,
}

/// Symbol table, in order of first appearance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SymTab(IndexMap<String, Symbol>);

impl SymTab {
    /// Define `name` at `addr`, resolving a pending forward reference.
    /// A second definition is rejected and leaves the first address in place.
    pub fn define(&mut self, name: &str, addr: Option<u16>, line: usize) -> Result<usize, Error> {
        match self.0.get_full_mut(name) {
            Some((_, _, sym)) if sym.defined_at.is_some() => {
                Err(Error::DuplicateSymbol(name.to_string()))
            }
            Some((idx, _, sym)) => {
                sym.addr = addr;
                sym.defined_at = Some(line);
                Ok(idx)
            }
            None => {
                let sym = Symbol {
                    addr,
                    defined_at: Some(line),
                };
                Ok(self.0.insert_full(name.to_string(), sym).0)
            }
        }
    }

    /// Index of `name`, adding an unresolved entry on first use.
    pub fn refer(&mut self, name: &str) -> usize {
        match self.0.get_index_of(name) {
            Some(idx) => idx,
            None => {
                let sym = Symbol {
                    addr: None,
                    defined_at: None,
                };
                self.0.insert_full(name.to_string(), sym).0
            }
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.get_index_of(name)
    }

    pub fn get(&self, idx: usize) -> Option<(&str, &Symbol)> {
        self.0.get_index(idx).map(|(name, sym)| (name.as_str(), sym))
    }

    pub fn addr(&self, name: &str) -> Option<u16> {
        self.0.get(name).and_then(|sym| sym.addr)
    }

    pub fn addr_at(&self, idx: usize) -> Option<u16> {
        self.get(idx).and_then(|(_, sym)| sym.addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.0.iter().map(|(name, sym)| (name.as_str(), sym))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SymTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, sym) in self.iter() {
            match sym.addr {
                Some(addr) => writeln!(f, "{:<10} {:>5}", name, addr)?,
                None => writeln!(f, "{:<10} {:>5}", name, "?")?,
            }
        }
        Ok(())
    }
}
