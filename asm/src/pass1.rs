use arch::{Arg, Cond, Declarative, Directive, Mnemonic, OpKind, Reg};
use tracing::{debug, trace};

use crate::error::Error;
use crate::ic::{Operand, Record, Stmt};
use crate::literal::LitTab;
use crate::parser::{parse_literal, parse_value, Line};
use crate::symbol::SymTab;

/// Number of addressable words. The location counter may reach this value
/// once the last word is used.
pub const MEMORY_SIZE: u32 = 1 << 16;

/// Tables and intermediate code built by the first pass.
#[derive(Debug, Default)]
pub struct Pass1 {
    /// Location counter
    pub lc: u32,
    pub symtab: SymTab,
    pub littab: LitTab,
    pub ic: Vec<Record>,
    /// Diagnostics with their (expanded) line index
    pub errors: Vec<(usize, Error)>,
}

enum Flow {
    Continue,
    End,
}

impl Pass1 {
    /// Scan `lines` once, stopping at `END`.
    pub fn run<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut pass = Pass1::default();
        let mut last = 0;
        for (idx, raw) in lines.into_iter().enumerate() {
            last = idx;
            if let Flow::End = pass.line(idx, raw) {
                debug!(
                    lc = pass.lc,
                    symbols = pass.symtab.len(),
                    literals = pass.littab.len(),
                    records = pass.ic.len(),
                    "pass 1 done"
                );
                return pass;
            }
        }
        pass.error(last, Error::MissingEnd);
        pass
    }

    fn error(&mut self, line: usize, err: Error) {
        self.errors.push((line, err));
    }

    fn emit(&mut self, line: usize, stmt: Stmt) {
        trace!(lc = self.lc, line, "{}", stmt);
        self.ic.push(Record {
            lc: self.lc,
            line,
            stmt,
        });
    }

    /// Move past `words` words just emitted at the current location.
    fn advance(&mut self, line: usize, words: u16) {
        let end = self.lc.saturating_add(u32::from(words));
        if end > MEMORY_SIZE {
            self.error(line, Error::AddressOverflow(self.lc.max(MEMORY_SIZE)));
        }
        self.lc = end;
    }

    fn line(&mut self, idx: usize, raw: &str) -> Flow {
        let line = Line::parse(raw);

        let op = match line.op {
            None => None,
            Some(Ok(op)) => Some(op),
            Some(Err(word)) => {
                self.label(idx, line.label);
                self.error(idx, Error::UnknownOperation(word.to_string()));
                return Flow::Continue;
            }
        };

        // EQU binds its label itself
        if op != Some(OpKind::Ad(Directive::EQU)) {
            self.label(idx, line.label);
        }

        let Some(op) = op else {
            return Flow::Continue;
        };
        let args = &line.args;

        match op {
            OpKind::Ad(Directive::START) => self.start(idx, args),
            OpKind::Ad(Directive::EQU) => self.equ(idx, line.label, args),
            OpKind::Ad(Directive::ORIGIN) => self.origin(idx, args),
            OpKind::Ad(d @ (Directive::LTORG | Directive::END)) => {
                self.emit(idx, Stmt::Directive(d, vec![]));
                self.close_pool(idx);
                if d == Directive::END {
                    return Flow::End;
                }
            }
            OpKind::Dl(Declarative::DS) => self.storage(idx, args),
            OpKind::Dl(Declarative::DC) => self.constant(idx, args),
            OpKind::Is(m) => self.imperative(idx, m, args),
        }
        Flow::Continue
    }

    fn label(&mut self, idx: usize, label: Option<&str>) {
        if let Some(name) = label {
            let addr = u16::try_from(self.lc).ok();
            if addr.is_none() {
                self.error(idx, Error::AddressOverflow(self.lc));
            }
            if let Err(err) = self.symtab.define(name, addr, idx) {
                self.error(idx, err);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Directives

    fn start(&mut self, idx: usize, args: &[&str]) {
        if let Some(arg) = args.first() {
            match arg.parse::<u16>() {
                Ok(lc) => self.lc = u32::from(lc),
                Err(_) => self.error(
                    idx,
                    Error::ParseArgument(arg.to_string(), "address".to_string()),
                ),
            }
        }
        self.emit(idx, Stmt::Directive(Directive::START, vec![]));
    }

    fn equ(&mut self, idx: usize, label: Option<&str>, args: &[&str]) {
        let Some(label) = label else {
            self.error(idx, Error::MissingLabel(Directive::EQU.to_string()));
            return;
        };
        let Some(arg) = args.first() else {
            self.error(idx, Error::MissingArgument(Directive::EQU.to_string()));
            if let Err(err) = self.symtab.define(label, None, idx) {
                self.error(idx, err);
            }
            return;
        };

        let (addr, operand) = match arg.parse::<u16>() {
            Ok(addr) => (Some(addr), Operand::Constant(addr as i32)),
            Err(_) => {
                // Backward references only
                let sym = self.symtab.refer(arg);
                let addr = self.symtab.addr_at(sym);
                if addr.is_none() {
                    self.error(idx, Error::UnresolvedSymbol(arg.to_string()));
                }
                (addr, Operand::Symbol(sym))
            }
        };
        if let Err(err) = self.symtab.define(label, addr, idx) {
            self.error(idx, err);
        }
        self.emit(idx, Stmt::Directive(Directive::EQU, vec![operand]));
    }

    fn origin(&mut self, idx: usize, args: &[&str]) {
        match args.first() {
            Some(arg) => match self.address(arg) {
                Ok(lc) => self.lc = u32::from(lc),
                Err(err) => self.error(idx, err),
            },
            None => self.error(idx, Error::MissingArgument(Directive::ORIGIN.to_string())),
        }
        let lc = Operand::Constant(i32::try_from(self.lc).unwrap_or(i32::MAX));
        self.emit(idx, Stmt::Directive(Directive::ORIGIN, vec![lc]));
    }

    /// `100`, `LOOP`, `LOOP+2` or `LOOP-1`, against resolved symbols only.
    fn address(&self, expr: &str) -> Result<u16, Error> {
        if let Ok(addr) = expr.parse::<u16>() {
            return Ok(addr);
        }
        let malformed = || Error::MalformedOperand(expr.to_string());

        let (name, offset) = match expr.find(|c: char| c == '+' || c == '-') {
            Some(pos) => {
                let (name, offset) = expr.split_at(pos);
                (name, offset.parse::<i32>().map_err(|_| malformed())?)
            }
            None => (expr, 0),
        };
        let base = self.symtab.addr(name).ok_or_else(malformed)?;
        let addr = i32::from(base).checked_add(offset).ok_or_else(malformed)?;
        u16::try_from(addr).map_err(|_| malformed())
    }

    fn close_pool(&mut self, idx: usize) {
        let range = self.littab.close_pool(self.lc);
        debug!(lc = self.lc, literals = range.len(), "literal pool closed");
        for lit in range {
            let value = self.littab.get(lit).map(|l| l.value).unwrap_or(0);
            self.emit(idx, Stmt::Constant(value));
            self.advance(idx, 1);
        }
    }

    // ------------------------------------------------------------------------
    // Declaratives

    fn storage(&mut self, idx: usize, args: &[&str]) {
        let size = match args.first() {
            Some(arg) => match arg.parse::<u16>() {
                Ok(size) => size,
                Err(_) => {
                    self.error(
                        idx,
                        Error::ParseArgument(arg.to_string(), "size".to_string()),
                    );
                    0
                }
            },
            None => {
                self.error(idx, Error::MissingArgument(Declarative::DS.to_string()));
                0
            }
        };
        self.emit(idx, Stmt::Storage(size));
        self.advance(idx, size);
    }

    fn constant(&mut self, idx: usize, args: &[&str]) {
        let value = match args.first() {
            Some(arg) => match parse_value(arg) {
                Some(value) => value,
                None => {
                    self.error(
                        idx,
                        Error::ParseArgument(arg.to_string(), "constant".to_string()),
                    );
                    0
                }
            },
            None => {
                self.error(idx, Error::MissingArgument(Declarative::DC.to_string()));
                0
            }
        };
        self.emit(idx, Stmt::Constant(value));
        self.advance(idx, 1);
    }

    // ------------------------------------------------------------------------
    // Imperatives

    fn imperative(&mut self, idx: usize, m: Mnemonic, args: &[&str]) {
        let slots = m.arg_field();
        if args.len() != slots.len() {
            self.error(idx, Error::OperandCount(m.to_string(), slots.len(), args.len()));
        }
        let operands: Vec<Operand> = args.iter().map(|arg| self.operand(idx, arg)).collect();
        for ((slot, operand), arg) in slots.iter().zip(&operands).zip(args) {
            let fits = match slot {
                Arg::Reg => matches!(operand, Operand::Register(_)),
                Arg::Cond => matches!(operand, Operand::Condition(_)),
                Arg::Mem => matches!(
                    operand,
                    Operand::Constant(_) | Operand::Symbol(_) | Operand::Literal(_)
                ),
            };
            if !fits {
                self.error(idx, Error::ParseArgument(arg.to_string(), slot.to_string()));
            }
        }
        self.emit(idx, Stmt::Imperative(m, operands));
        self.advance(idx, 1);
    }

    fn operand(&mut self, idx: usize, arg: &str) -> Operand {
        if let Ok(reg) = Reg::parse(arg) {
            return Operand::Register(reg);
        }
        if let Ok(cond) = Cond::parse(arg) {
            return Operand::Condition(cond);
        }
        if arg.starts_with('=') {
            let value = match parse_literal(arg) {
                Some(value) => value,
                None => {
                    self.error(
                        idx,
                        Error::ParseArgument(arg.to_string(), "literal".to_string()),
                    );
                    0
                }
            };
            return Operand::Literal(self.littab.register(arg, value));
        }
        if let Ok(value) = arg.parse::<i32>() {
            return Operand::Constant(value);
        }
        Operand::Symbol(self.symtab.refer(arg))
    }
}
