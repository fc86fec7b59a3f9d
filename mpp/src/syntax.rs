use serde::{Deserialize, Serialize};

/// Markers recognized by the macro processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Syntax {
    /// Opens a macro definition
    pub start: String,
    /// Closes a macro definition
    pub end: String,
    /// Prefix of formal parameter names
    pub prefix: String,
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax {
            start: "MACRO".to_string(),
            end: "MEND".to_string(),
            prefix: "&".to_string(),
        }
    }
}

impl Syntax {
    pub fn is_start(&self, word: &str) -> bool {
        word.eq_ignore_ascii_case(&self.start)
    }

    pub fn is_end(&self, word: &str) -> bool {
        word.eq_ignore_ascii_case(&self.end)
    }

    /// `E` and `&E` both name the parameter `&E`.
    pub fn param_name(&self, name: &str) -> String {
        if name.starts_with(&self.prefix) {
            name.to_string()
        } else {
            format!("{}{}", self.prefix, name)
        }
    }
}

/// Split a line into words. Commas separate like whitespace and `;` starts a comment.
pub fn words(line: &str) -> Vec<&str> {
    let code = match line.split_once(';') {
        Some((code, _)) => code,
        None => line,
    };
    code.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .collect()
}
