use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::value::Builtin;
use crate::value::Value;

static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    standard_library()
        .into_iter()
        .map(|builtin| (builtin.name, builtin))
        .collect()
});

pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.get(name).copied()
}

fn standard_library() -> Vec<Builtin> {
    vec![
        Builtin {
            name: "len",
            func: builtin_len,
        },
        Builtin {
            name: "first",
            func: builtin_first,
        },
        Builtin {
            name: "last",
            func: builtin_last,
        },
        Builtin {
            name: "rest",
            func: builtin_rest,
        },
        Builtin {
            name: "push",
            func: builtin_push,
        },
        Builtin {
            name: "puts",
            func: builtin_puts,
        },
    ]
}

// len counts bytes for strings and elements for arrays
fn builtin_len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_argument_count(args.len(), 1);
    }
    match &args[0] {
        Value::String(value) => Value::Integer(value.len() as i64),
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        other => unsupported_argument("len", other),
    }
}

fn builtin_first(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_argument_count(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => elements.first().cloned().unwrap_or(Value::Null),
        other => unsupported_argument("first", other),
    }
}

fn builtin_last(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_argument_count(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => elements.last().cloned().unwrap_or(Value::Null),
        other => unsupported_argument("last", other),
    }
}

fn builtin_rest(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_argument_count(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Value::Null
            } else {
                Value::Array(elements[1..].to_vec())
            }
        }
        other => unsupported_argument("rest", other),
    }
}

// returns a new array; the original is left untouched
fn builtin_push(args: &[Value]) -> Value {
    if args.len() != 2 {
        return wrong_argument_count(args.len(), 2);
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut pushed = elements.clone();
            pushed.push(args[1].clone());
            Value::Array(pushed)
        }
        other => unsupported_argument("push", other),
    }
}

fn builtin_puts(args: &[Value]) -> Value {
    for arg in args {
        println!("{arg}");
    }
    Value::Null
}

fn wrong_argument_count(got: usize, want: usize) -> Value {
    Value::Error(format!("wrong number of arguments. got={got}, want={want}"))
}

fn unsupported_argument(name: &str, value: &Value) -> Value {
    Value::Error(format!(
        "argument to \"{name}\" not supported, got {}",
        value.type_name()
    ))
}
