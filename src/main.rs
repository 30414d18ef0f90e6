use std::env;
use std::fs;
use std::io;

use tamarin::error;
use tamarin::error::BasicError;
use tamarin::repl;
use tamarin::Environment;
use tamarin::Value;

fn main() -> error::GenericResult<()> {
    let mut args = env::args();
    args.next()
        .expect("Program arguments should have at least one entry (typically the path of the executable)");

    if args.len() > 1 {
        println!("Usage: tamarin [SCRIPT_PATH]");
        Err(Box::new(BasicError::new("Too many input arguments")))
    } else if let Some(path) = args.next() {
        run_file(&path)
    } else {
        run_prompt()
    }
}

fn run_file(path: &str) -> error::GenericResult<()> {
    let contents = fs::read_to_string(path)?;
    let env = Environment::new();

    let result = tamarin::execute(&contents, &env)?;
    if let Value::Error(_) = result {
        println!("{result}");
    }

    Ok(())
}

fn run_prompt() -> error::GenericResult<()> {
    println!("Welcome to the interactive prompt for the Tamarin interpreter.");
    println!("Feel free to type in commands.\n");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    repl::start(&mut input, &mut output)?;

    Ok(())
}
