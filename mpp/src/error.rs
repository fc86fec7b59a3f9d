use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid keyword argument: `{0}`")]
    InvalidKeywordArgument(String),

    #[error("Too many arguments for macro `{0}`: `{1}`")]
    TooManyArguments(String, String),

    #[error("Parameter `{1}` of macro `{0}` has no value")]
    UnboundParameter(String, String),

    #[error("Macro name required after `{0}`")]
    MissingMacroName(String),

    #[error("Re-defined macro: `{0}`")]
    DuplicateMacro(String),

    #[error("Unterminated macro: `{0}`")]
    UnterminatedMacro(String),
}
