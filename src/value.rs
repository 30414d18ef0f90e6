use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hasher;
use std::rc::Rc;

use fxhash::FxHasher64;

use crate::environment::Environment;
use crate::stmt::BlockStatement;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Return(Box<Value>),
    Error(String),
    Function(Function),
    Builtin(Builtin),
    Array(Vec<Value>),
    Hash(HashMap<HashKey, HashPair>),
}

impl Value {
    // type name as it appears in runtime error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Boolean(_) => "BOOLEAN",
            Self::String(_) => "STRING",
            Self::Null => "NULL",
            Self::Return(_) => "RETURN_VALUE",
            Self::Error(_) => "ERROR",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
            Self::Array(_) => "ARRAY",
            Self::Hash(_) => "HASH",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    // Only integers, booleans, and strings can key a hash. The projection is
    // deterministic across runs: string payloads come from a fixed-seed
    // 64-bit content hash, so equal strings always collide on purpose.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Self::Integer(value) => Some(HashKey {
                tag: HashKeyTag::Integer,
                payload: *value as u64,
            }),
            Self::Boolean(value) => Some(HashKey {
                tag: HashKeyTag::Boolean,
                payload: u64::from(*value),
            }),
            Self::String(value) => {
                let mut hasher = FxHasher64::default();
                hasher.write(value.as_bytes());
                Some(HashKey {
                    tag: HashKeyTag::String,
                    payload: hasher.finish(),
                })
            }
            _ => None,
        }
    }
}

// The inspect form shown to users.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::Null => write!(f, "null"),
            Self::Return(value) => write!(f, "{value}"),
            Self::Error(message) => write!(f, "ERROR: {message}"),
            Self::Function(function) => write!(
                f,
                "fn({}) {{\n{}\n}}",
                function.parameters.join(", "),
                function.body
            ),
            Self::Builtin(_) => write!(f, "builtin function"),
            Self::Array(elements) => {
                let rendered: Vec<String> =
                    elements.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Self::Hash(pairs) => {
                let rendered: Vec<String> = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
        }
    }
}

// A closure: parameters and body shared with the AST, plus the environment
// that was current at the definition site.
#[derive(Clone)]
pub struct Function {
    pub parameters: Rc<Vec<String>>,
    pub body: Rc<BlockStatement>,
    pub env: Rc<RefCell<Environment>>,
}

// Closures compare by identity, not structure.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.env, &other.env)
    }
}

// The captured environment can reach back to this function, so Debug keeps
// it opaque to avoid walking the cycle.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &format_args!("{}", self.body))
            .field("env", &"ENVIRONMENT")
            .finish()
    }
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: fn(&[Value]) -> Value,
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("func", &"BUILTIN_FUNCTION")
            .finish()
    }
}

// (type tag, 64-bit payload) projection of a hashable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    tag: HashKeyTag,
    payload: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum HashKeyTag {
    Integer,
    Boolean,
    String,
}

// Stored hash entry; keeps the original key value around for display.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}
