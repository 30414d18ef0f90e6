use std::fmt;
use std::rc::Rc;

use crate::stmt::BlockStatement;

// Function literal parameters and bodies are Rc-shared so that function
// values can reference them without copying the subtree out of the AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier {
        name: String,
    },
    IntegerLiteral {
        value: i64,
    },
    StringLiteral {
        value: String,
    },
    BooleanLiteral {
        value: bool,
    },
    Prefix {
        operator: String,
        right: Box<Expr>,
    },
    Infix {
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        parameters: Rc<Vec<String>>,
        body: Rc<BlockStatement>,
    },
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
    ArrayLiteral {
        elements: Vec<Expr>,
    },
    Index {
        left: Box<Expr>,
        index: Box<Expr>,
    },
    HashLiteral {
        pairs: Vec<(Expr, Expr)>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name } => write!(f, "{name}"),
            Self::IntegerLiteral { value } => write!(f, "{value}"),
            Self::StringLiteral { value } => write!(f, "{value}"),
            Self::BooleanLiteral { value } => write!(f, "{value}"),
            Self::Prefix { operator, right } => write!(f, "({operator}{right})"),
            Self::Infix {
                operator,
                left,
                right,
            } => write!(f, "({left} {operator} {right})"),
            Self::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            }
            Self::FunctionLiteral { parameters, body } => {
                write!(f, "fn({}) {body}", parameters.join(", "))
            }
            Self::Call {
                function,
                arguments,
            } => write!(f, "{function}({})", join_expressions(arguments)),
            Self::ArrayLiteral { elements } => write!(f, "[{}]", join_expressions(elements)),
            Self::Index { left, index } => write!(f, "({left}[{index}])"),
            Self::HashLiteral { pairs } => {
                let rendered: Vec<String> =
                    pairs.iter().map(|(key, value)| format!("{key}:{value}")).collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
        }
    }
}

fn join_expressions(expressions: &[Expr]) -> String {
    expressions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}
