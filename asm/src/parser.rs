use arch::OpKind;

// ----------------------------------------------------------------------------
// Line

/// One source line split into `[label] opcode [operand1[, operand2]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub label: Option<&'a str>,
    /// `Err` holds the word found where an opcode was expected
    pub op: Option<Result<OpKind, &'a str>>,
    pub args: Vec<&'a str>,
}

impl<'a> Line<'a> {
    /// The first word is a label unless it is a mnemonic. A trailing `:` on a
    /// label is dropped.
    pub fn parse(raw: &'a str) -> Self {
        let words = mpp::words(raw);

        let (label, rest) = match words.split_first() {
            None => {
                return Line {
                    label: None,
                    op: None,
                    args: vec![],
                }
            }
            Some((&head, rest)) => match OpKind::parse(head) {
                Ok(_) => (None, &words[..]),
                Err(_) => (Some(head.trim_end_matches(':')), rest),
            },
        };

        match rest.split_first() {
            None => Line {
                label,
                op: None,
                args: vec![],
            },
            Some((&op, args)) => Line {
                label,
                op: Some(OpKind::parse(op).map_err(|_| op)),
                args: args.to_vec(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.op.is_none()
    }
}

// ----------------------------------------------------------------------------
// Numbers

/// Integer value of a constant, with optional quotes: `5`, `'5'`, `'-2'`.
pub fn parse_value(s: &str) -> Option<i32> {
    s.trim_matches('\'').parse::<i32>().ok()
}

/// Value of a literal: `='5'` or `=5`.
pub fn parse_literal(s: &str) -> Option<i32> {
    parse_value(s.strip_prefix('=')?)
}
