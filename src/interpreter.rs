use std::cell::Cell;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::builtins;
use crate::environment::Environment;
use crate::expr::Expr;
use crate::stmt::BlockStatement;
use crate::stmt::Program;
use crate::stmt::Stmt;
use crate::value::Function;
use crate::value::HashPair;
use crate::value::Value;

const TRUE: Value = Value::Boolean(true);
const FALSE: Value = Value::Boolean(false);
const NULL: Value = Value::Null;

// Evaluation recurses on the host stack, so nested function application is
// capped; exceeding the cap yields an error value instead of aborting.
const MAX_CALL_DEPTH: usize = 200;

thread_local! {
    static CALL_DEPTH: Cell<usize> = Cell::new(0);
}

pub fn eval_program(program: &Program, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = NULL;

    for statement in &program.statements {
        match eval_statement(statement, env) {
            // the top level unwraps an early return exactly once
            Value::Return(value) => return *value,
            error @ Value::Error(_) => return error,
            value => result = value,
        }
    }

    result
}

fn eval_statement(statement: &Stmt, env: &Rc<RefCell<Environment>>) -> Value {
    match statement {
        Stmt::Let { name, value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            env.borrow_mut().set(name.clone(), value);
            NULL
        }
        Stmt::Return { value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            Value::Return(Box::new(value))
        }
        Stmt::Expression { expression } => eval_expression(expression, env),
    }
}

fn eval_block(block: &BlockStatement, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = NULL;

    for statement in &block.statements {
        result = eval_statement(statement, env);

        // return wrappers pass through blocks unopened so that a nested
        // return unwinds all the way to the enclosing function call
        if matches!(result, Value::Return(_) | Value::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_expression(expression: &Expr, env: &Rc<RefCell<Environment>>) -> Value {
    match expression {
        Expr::IntegerLiteral { value } => Value::Integer(*value),
        Expr::StringLiteral { value } => Value::String(value.clone()),
        Expr::BooleanLiteral { value } => bool_to_value(*value),
        Expr::Identifier { name } => eval_identifier(name, env),
        Expr::Prefix { operator, right } => {
            let operand = eval_expression(right, env);
            if operand.is_error() {
                return operand;
            }
            eval_prefix_expression(operator, operand)
        }
        Expr::Infix {
            operator,
            left,
            right,
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(operator, left, right)
        }
        Expr::If {
            condition,
            consequence,
            alternative,
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expr::FunctionLiteral { parameters, body } => Value::Function(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: env.clone(),
        }),
        Expr::Call {
            function,
            arguments,
        } => {
            let callee = eval_expression(function, env);
            if callee.is_error() {
                return callee;
            }
            let arguments = match eval_expressions(arguments, env) {
                Ok(values) => values,
                Err(error) => return error,
            };
            apply_function(callee, arguments)
        }
        Expr::ArrayLiteral { elements } => match eval_expressions(elements, env) {
            Ok(values) => Value::Array(values),
            Err(error) => error,
        },
        Expr::Index { left, index } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expr::HashLiteral { pairs } => eval_hash_literal(pairs, env),
    }
}

// environment first, builtin table as fallback
fn eval_identifier(name: &str, env: &Rc<RefCell<Environment>>) -> Value {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return Value::Builtin(builtin);
    }
    Value::Error(format!("identifier not found: {name}"))
}

fn eval_prefix_expression(operator: &str, operand: Value) -> Value {
    match operator {
        "!" => bool_to_value(!is_truthy(&operand)),
        "-" => match operand {
            Value::Integer(value) => Value::Integer(value.wrapping_neg()),
            other => Value::Error(format!("unknown operator: -{}", other.type_name())),
        },
        _ => Value::Error(format!(
            "unknown operator: {}{}",
            operator,
            operand.type_name()
        )),
    }
}

fn eval_infix_expression(operator: &str, left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::Integer(left), Value::Integer(right)) => {
            eval_integer_infix_expression(operator, left, right)
        }
        (left, right)
            if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) =>
        {
            eval_string_infix_expression(operator, left, right)
        }
        (left, right) => match operator {
            "==" => bool_to_value(left == right),
            "!=" => bool_to_value(left != right),
            _ if left.type_name() != right.type_name() => Value::Error(format!(
                "type mismatch: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
            _ => Value::Error(format!(
                "unknown operator: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
        },
    }
}

// Arithmetic wraps on overflow, matching two's-complement host semantics.
fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left.wrapping_add(right)),
        "-" => Value::Integer(left.wrapping_sub(right)),
        "*" => Value::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                Value::Error("division by zero".to_string())
            } else {
                Value::Integer(left.wrapping_div(right))
            }
        }
        "<" => bool_to_value(left < right),
        ">" => bool_to_value(left > right),
        "==" => bool_to_value(left == right),
        "!=" => bool_to_value(left != right),
        _ => Value::Error(format!("unknown operator: INTEGER {operator} INTEGER")),
    }
}

// Concatenation is the only string operator; anything else involving a
// string operand is an unknown-operator error.
fn eval_string_infix_expression(operator: &str, left: Value, right: Value) -> Value {
    if operator == "+" {
        if let (Value::String(left), Value::String(right)) = (&left, &right) {
            return Value::String(format!("{left}{right}"));
        }
    }
    Value::Error(format!(
        "unknown operator: {} {} {}",
        left.type_name(),
        operator,
        right.type_name()
    ))
}

// The branches evaluate in the current environment; `if` introduces no scope.
fn eval_if_expression(
    condition: &Expr,
    consequence: &BlockStatement,
    alternative: Option<&BlockStatement>,
    env: &Rc<RefCell<Environment>>,
) -> Value {
    let condition = eval_expression(condition, env);
    if condition.is_error() {
        return condition;
    }

    if is_truthy(&condition) {
        eval_block(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block(alternative, env)
    } else {
        NULL
    }
}

// evaluate left to right, abandoning the rest on the first error
fn eval_expressions(
    expressions: &[Expr],
    env: &Rc<RefCell<Environment>>,
) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(expressions.len());

    for expression in expressions {
        let value = eval_expression(expression, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }

    Ok(values)
}

fn apply_function(callee: Value, arguments: Vec<Value>) -> Value {
    match callee {
        Value::Function(function) => {
            if arguments.len() != function.parameters.len() {
                return Value::Error(format!(
                    "wrong number of arguments. got={}, want={}",
                    arguments.len(),
                    function.parameters.len()
                ));
            }
            if !enter_call() {
                return Value::Error("stack overflow".to_string());
            }

            let env = Environment::new_enclosed(function.env.clone());
            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                env.borrow_mut().set(parameter.clone(), argument);
            }

            let result = eval_block(&function.body, &env);
            leave_call();

            // unwrap a single return wrapper at the call boundary
            match result {
                Value::Return(value) => *value,
                other => other,
            }
        }
        Value::Builtin(builtin) => (builtin.func)(&arguments),
        other => Value::Error(format!("not a function: {}", other.type_name())),
    }
}

fn enter_call() -> bool {
    CALL_DEPTH.with(|depth| {
        if depth.get() >= MAX_CALL_DEPTH {
            false
        } else {
            depth.set(depth.get() + 1);
            true
        }
    })
}

fn leave_call() {
    CALL_DEPTH.with(|depth| depth.set(depth.get() - 1));
}

fn eval_index_expression(left: Value, index: Value) -> Value {
    match (left, index) {
        (Value::Array(elements), Value::Integer(index)) => {
            if index < 0 || index as usize >= elements.len() {
                NULL
            } else {
                elements[index as usize].clone()
            }
        }
        (Value::Hash(pairs), index) => match index.hash_key() {
            Some(key) => pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(NULL),
            None => Value::Error(format!("unusable as hash key: {}", index.type_name())),
        },
        (left, _) => Value::Error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}

fn eval_hash_literal(pairs: &[(Expr, Expr)], env: &Rc<RefCell<Environment>>) -> Value {
    let mut map = HashMap::new();

    for (key_expression, value_expression) in pairs {
        let key = eval_expression(key_expression, env);
        if key.is_error() {
            return key;
        }

        let hash_key = match key.hash_key() {
            Some(hash_key) => hash_key,
            None => {
                return Value::Error(format!("unusable as hash key: {}", key.type_name()))
            }
        };

        let value = eval_expression(value_expression, env);
        if value.is_error() {
            return value;
        }

        map.insert(hash_key, HashPair { key, value });
    }

    Value::Hash(map)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Boolean(value) => *value,
        _ => true,
    }
}

// shared singletons; every boolean the evaluator produces is one of these
fn bool_to_value(value: bool) -> Value {
    if value {
        TRUE
    } else {
        FALSE
    }
}
