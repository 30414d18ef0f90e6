use std::cell::RefCell;
use std::rc::Rc;

pub mod builtins;
pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod parser;
pub mod repl;
pub mod scanner;
pub mod stmt;
pub mod value;

pub use environment::Environment;
pub use value::Value;

pub type ExecutionResult = error::GenericResult<Value>;

// Parse and evaluate a complete source text against the given environment.
// Syntax errors surface as a host error carrying every accumulated message;
// runtime failures come back as the language's own Error value.
pub fn execute(code: &str, env: &Rc<RefCell<Environment>>) -> ExecutionResult {
    let mut parser = parser::Parser::new(scanner::Scanner::new(code));
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        return Err(Box::new(error::ParserErrors::new(
            parser.errors().to_vec(),
        )));
    }

    Ok(interpreter::eval_program(&program, env))
}
