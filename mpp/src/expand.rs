use indexmap::IndexMap;
use tracing::debug;

use crate::error::Error;
use crate::syntax::{words, Syntax};
use crate::table::{MacroDef, Mdt, Mnt};

// ----------------------------------------------------------------------------
// Argument binding

/// Formal parameter name to actual value, for a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding(IndexMap<String, String>);

impl Binding {
    /// Bind the actual arguments of one call to the formal parameters of `def`.
    ///
    /// Defaults are seeded first. Arguments up to the first one containing `=`
    /// go to the positional parameters in declaration order. Everything after
    /// that must be `name=value` and overrides the binding of `name`.
    pub fn bind(def: &MacroDef, args: &[&str], syntax: &Syntax) -> (Binding, Vec<Error>) {
        let mut map = IndexMap::new();
        let mut errors = vec![];

        for param in &def.params {
            if let Some(default) = &param.default {
                map.insert(param.name.clone(), default.clone());
            }
        }

        let split = args
            .iter()
            .position(|arg| arg.contains('='))
            .unwrap_or(args.len());
        let (positional, keyword) = args.split_at(split);

        let mut slots = def.params.iter().filter(|p| p.is_positional());
        for arg in positional {
            match slots.next() {
                Some(param) => {
                    map.insert(param.name.clone(), arg.to_string());
                }
                None => errors.push(Error::TooManyArguments(def.name.clone(), arg.to_string())),
            }
        }

        for arg in keyword {
            let Some((name, value)) = arg.split_once('=') else {
                errors.push(Error::InvalidKeywordArgument(arg.to_string()));
                continue;
            };
            let name = syntax.param_name(name);
            if def.params.iter().any(|p| p.name == name) {
                map.insert(name, value.to_string());
            } else {
                errors.push(Error::InvalidKeywordArgument(arg.to_string()));
            }
        }

        for param in &def.params {
            if !map.contains_key(&param.name) {
                errors.push(Error::UnboundParameter(def.name.clone(), param.name.clone()));
            }
        }

        (Binding(map), errors)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every word that exactly matches a bound parameter.
    pub fn substitute(&self, line: &str) -> String {
        words(line)
            .into_iter()
            .map(|w| self.get(w).unwrap_or(w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ----------------------------------------------------------------------------
// Expansion

/// Replay the body of `def` with `binding`, one output line per body line.
pub fn replay(def: &MacroDef, binding: &Binding, mdt: &Mdt, syntax: &Syntax) -> Vec<String> {
    mdt.body(def.mdt_index, &syntax.end)
        .map(|line| binding.substitute(line))
        .collect()
}

/// Expand one source line. Returns `None` if it is not a macro call.
pub(crate) fn expand_line(
    raw: &str,
    mnt: &Mnt,
    mdt: &Mdt,
    syntax: &Syntax,
) -> Option<(Vec<String>, Vec<Error>)> {
    let ws = words(raw);
    let (head, args) = ws.split_first()?;
    let def = mnt.get(head)?;

    let (binding, errors) = Binding::bind(def, args, syntax);
    debug!(name = %def.name, args = args.len(), errors = errors.len(), "macro call");
    Some((replay(def, &binding, mdt, syntax), errors))
}
