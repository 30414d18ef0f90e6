use std::error::Error;
use std::fmt;
use std::result;

pub type GenericResult<T> = result::Result<T, Box<dyn Error>>;

#[derive(Debug)]
pub struct BasicError {
    pub description: String,
}

impl BasicError {
    pub fn new(description: &str) -> BasicError {
        BasicError {
            description: description.to_string(),
        }
    }
}

impl fmt::Display for BasicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

impl Error for BasicError {}

// Everything the parser accumulated for one source text; the parser itself
// never aborts, so a single host error carries the whole batch.
#[derive(Debug)]
pub struct ParserErrors {
    pub messages: Vec<String>,
}

impl ParserErrors {
    pub fn new(messages: Vec<String>) -> ParserErrors {
        ParserErrors { messages }
    }
}

impl fmt::Display for ParserErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("\n"))
    }
}

impl Error for ParserErrors {}
