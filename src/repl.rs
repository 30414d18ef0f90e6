use std::io;
use std::io::BufRead;
use std::io::Write;

use crate::environment::Environment;
use crate::interpreter;
use crate::parser::Parser;
use crate::scanner::Scanner;

pub const PROMPT: &str = ">> ";

const BANNER: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

// Read-eval-print loop over one persistent top-level environment. Returns
// when the reader is exhausted (stdin closed).
pub fn start(input: &mut dyn BufRead, output: &mut dyn Write) -> io::Result<()> {
    let env = Environment::new();
    let mut line = String::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let mut parser = Parser::new(Scanner::new(&line));
        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            print_parser_errors(output, parser.errors())?;
            continue;
        }
        if program.statements.is_empty() {
            continue;
        }

        let evaluated = interpreter::eval_program(&program, &env);
        writeln!(output, "{evaluated}")?;
    }
}

fn print_parser_errors(output: &mut dyn Write, errors: &[String]) -> io::Result<()> {
    write!(output, "{BANNER}")?;
    writeln!(output, "Woops! We ran into some monkey business here!")?;
    writeln!(output, " parser errors:")?;
    for message in errors {
        writeln!(output, "\t{message}")?;
    }
    Ok(())
}
