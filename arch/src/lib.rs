pub mod cond;
pub mod op;
pub mod reg;

pub use cond::Cond;
pub use op::{Arg, Class, Declarative, Directive, Mnemonic, OpKind};
pub use reg::Reg;
