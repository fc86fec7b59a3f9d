use serde::Serialize;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Literal {
    /// Source text, e.g. `='5'`
    pub text: String,
    pub value: i32,
    /// `None` until its pool is closed
    pub addr: Option<u16>,
}

/// Literal table together with the pool table.
///
/// Pool `k` owns the indices from `pools[k]` up to the next start (or the
/// end of the table). The last start is the pool still collecting literals.
#[derive(Debug, Clone, Serialize)]
pub struct LitTab {
    entries: Vec<Literal>,
    pools: Vec<usize>,
}

impl Default for LitTab {
    fn default() -> Self {
        LitTab {
            entries: vec![],
            pools: vec![0],
        }
    }
}

impl LitTab {
    fn open(&self) -> usize {
        self.pools.last().copied().unwrap_or(0)
    }

    /// Index of `text` in the open pool, adding it on first use in this pool.
    pub fn register(&mut self, text: &str, value: i32) -> usize {
        let start = self.open();
        if let Some(pos) = self.entries[start..].iter().position(|l| l.text == text) {
            return start + pos;
        }
        self.entries.push(Literal {
            text: text.to_string(),
            value,
            addr: None,
        });
        self.entries.len() - 1
    }

    /// Literals waiting for the next pool-closing event.
    pub fn pending(&self) -> &[Literal] {
        &self.entries[self.open()..]
    }

    /// Give the open pool consecutive addresses from `lc` in registration
    /// order and start a new pool. Returns the indices that were assigned.
    /// A literal that falls past the end of memory keeps no address.
    pub fn close_pool(&mut self, lc: u32) -> Range<usize> {
        let range = self.open()..self.entries.len();
        for (offset, idx) in range.clone().enumerate() {
            self.entries[idx].addr = u32::try_from(offset)
                .ok()
                .and_then(|offset| lc.checked_add(offset))
                .and_then(|addr| u16::try_from(addr).ok());
        }
        if !range.is_empty() {
            self.pools.push(range.end);
        }
        range
    }

    pub fn get(&self, idx: usize) -> Option<&Literal> {
        self.entries.get(idx)
    }

    pub fn addr_at(&self, idx: usize) -> Option<u16> {
        self.get(idx).and_then(|lit| lit.addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pool table: starting literal index of each pool.
    pub fn pool_table(&self) -> &[usize] {
        &self.pools
    }

    /// Index range of every pool holding at least one literal.
    pub fn pools(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let len = self.entries.len();
        self.pools
            .iter()
            .enumerate()
            .map(move |(k, &start)| start..self.pools.get(k + 1).copied().unwrap_or(len))
            .filter(|range| !range.is_empty())
    }
}

impl fmt::Display for LitTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lit in self.iter() {
            match lit.addr {
                Some(addr) => writeln!(f, "{:<10} {:>5}", lit.text, addr)?,
                None => writeln!(f, "{:<10} {:>5}", lit.text, "?")?,
            }
        }
        Ok(())
    }
}
