use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown operation: `{0}`")]
    UnknownOperation(String),

    #[error("More argument required for `{0}`")]
    MissingArgument(String),

    #[error("Cannot parse `{0}` as {1}")]
    ParseArgument(String, String),

    #[error("`{0}` takes {1} operand(s) but {2} given")]
    OperandCount(String, usize, usize),

    #[error("Label required for `{0}`")]
    MissingLabel(String),

    #[error("Re-defined symbol: `{0}`")]
    DuplicateSymbol(String),

    #[error("Undefined symbol: `{0}`")]
    UnresolvedSymbol(String),

    #[error("Literal without address: `{0}`")]
    UnresolvedLiteral(String),

    #[error("Malformed operand: `{0}`")]
    MalformedOperand(String),

    #[error("Location {0} is past the end of memory")]
    AddressOverflow(u32),

    #[error("Reached end of source without `END`")]
    MissingEnd,

    #[error(transparent)]
    Macro(#[from] mpp::Error),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Invalid config file: {0}")]
    Config(String, #[source] serde_yaml::Error),
}

impl Error {
    /// Warnings are reported but do not fail the run.
    pub fn is_warning(&self) -> bool {
        matches!(self, Error::MissingEnd)
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, line_idx: usize, line_content: &str) {
        if self.is_warning() {
            cprintln!("<yellow,bold>warn</>: {}", self);
        } else {
            cprintln!("<red,bold>error</>: {}", self);
        }

        // line_idx is 0-based, display as 1-based
        let line_num = line_idx + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        cprintln!("      <blue>|</>");
    }
}
