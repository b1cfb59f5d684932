use crate::ast::{self, Expression, Statement};
use crate::builtins::{Builtins, BUILTINS};
use crate::config::Config;
use crate::environment::{Env, Environment};
use crate::object::{EvalError, FunctionObject, HashValue, Object, Result, NULL};
use crate::stack::ensure_sufficient_stack;
use std::convert::TryFrom;
use std::rc::Rc;
use tracing::{debug, trace};


/// Returns early from the enclosing function when `$obj` is an `Error` or a
/// `ReturnValue`; otherwise yields it.
macro_rules! propagate {
    ($obj:expr) => {{
        let obj = $obj;
        if obj.is_error() || obj.is_return_value() {
            return obj;
        }
        obj
    }};
}

pub fn eval(program: &ast::Program, env: &Env) -> Option<Object> {
    Evaluator::default().eval_program(program, env)
}

pub struct Evaluator<'b> {
    builtins: &'b Builtins,
    max_depth: Option<usize>,
    depth: usize,
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Self::new(&BUILTINS).with_max_depth(Config::default().max_depth)
    }
}

impl<'b> Evaluator<'b> {
    pub fn new(builtins: &'b Builtins) -> Self {
        Self {
            builtins,
            max_depth: None,
            depth: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Evaluates top-level statements in order. `None` means the program
    /// produced nothing to show: it was empty or ended in a `let`.
    pub fn eval_program(&mut self, program: &ast::Program, env: &Env) -> Option<Object> {
        let mut result = None;

        for stmt in program.statements.iter() {
            match self.eval_statement(stmt, env) {
                Some(Object::ReturnValue(value)) => return Some(*value),
                Some(err @ Object::Error(_)) => return Some(err),
                other => result = other,
            }
        }

        result
    }

    pub fn eval_block(&mut self, block: &ast::BlockStatement, env: &Env) -> Object {
        let mut result = NULL;

        for stmt in block.statements.iter() {
            result = self.eval_statement(stmt, env).unwrap_or(NULL);
            if result.is_error() || result.is_return_value() {
                return result;
            }
        }

        result
    }

    fn eval_statement(&mut self, stmt: &Statement, env: &Env) -> Option<Object> {
        match stmt {
            Statement::Let(stmt) => {
                let value = self.eval_expression(&stmt.value, env);
                if value.is_error() || value.is_return_value() {
                    return Some(value);
                }
                env.borrow_mut().set(&stmt.name.value, value);
                None
            }
            Statement::Return(stmt) => {
                let value = self.eval_expression(&stmt.return_value, env);
                if value.is_error() || value.is_return_value() {
                    return Some(value);
                }
                Some(Object::ReturnValue(Box::new(value)))
            }
            Statement::Expr(stmt) => Some(self.eval_expression(&stmt.expression, env)),
            Statement::Block(block) => Some(self.eval_block(block, env)),
        }
    }

    pub fn eval_expression(&mut self, expr: &Expression, env: &Env) -> Object {
        ensure_sufficient_stack(|| match expr {
            Expression::Identifier(ident) => self.eval_identifier(ident, env),
            Expression::IntegerLiteral(n) => Object::Integer(*n),
            Expression::String(s) => Object::String(s.value.clone()),
            Expression::Boolean(b) => b.0.into(),
            Expression::Prefix(prefix) => {
                let right = propagate!(self.eval_expression(&prefix.right, env));
                eval_prefix_expression(prefix.operator, right).into()
            }
            Expression::Infix(infix) => {
                let left = propagate!(self.eval_expression(&infix.left, env));
                let right = propagate!(self.eval_expression(&infix.right, env));
                eval_infix_expression(infix.operator, left, right).into()
            }
            Expression::If(if_expr) => self.eval_if_expression(if_expr, env),
            Expression::Function(func) => Object::Function(FunctionObject {
                parameters: func.parameters.clone(),
                body: Rc::clone(&func.body),
                env: Rc::clone(env),
            }),
            Expression::Call(call) => self.eval_call_expression(call, env),
            Expression::Array(array) => match self.eval_expressions(&array.elements, env) {
                Ok(elements) => Object::Array(elements),
                Err(obj) => obj,
            },
            Expression::Index(index) => {
                let left = propagate!(self.eval_expression(&index.left, env));
                let index = propagate!(self.eval_expression(&index.index, env));
                eval_index_expression(left, index).into()
            }
            Expression::Hash(hash) => self.eval_hash_literal(hash, env),
        })
    }

    fn eval_identifier(&self, ident: &ast::Identifier, env: &Env) -> Object {
        env.borrow()
            .get(&ident.value)
            .or_else(|| self.builtins.get(&ident.value))
            .unwrap_or_else(|| {
                EvalError::IdentifierNotFound {
                    id: ident.value.clone(),
                }
                .into()
            })
    }

    fn eval_if_expression(&mut self, if_expr: &ast::IfExpression, env: &Env) -> Object {
        let condition = propagate!(self.eval_expression(&if_expr.condition, env));

        if condition.truth_value() {
            self.eval_block(&if_expr.consequence, env)
        } else if let Some(alternative) = &if_expr.alternative {
            self.eval_block(alternative, env)
        } else {
            NULL
        }
    }

    // Stops at the first `Error` or `ReturnValue`.
    fn eval_expressions(
        &mut self,
        exprs: &[Expression],
        env: &Env,
    ) -> std::result::Result<Vec<Object>, Object> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs.iter() {
            let value = self.eval_expression(expr, env);
            if value.is_error() || value.is_return_value() {
                return Err(value);
            }
            values.push(value);
        }
        Ok(values)
    }

    fn eval_call_expression(&mut self, call: &ast::CallExpression, env: &Env) -> Object {
        let function = propagate!(self.eval_expression(&call.function, env));
        if !matches!(function, Object::Function(_) | Object::Builtin(_)) {
            return EvalError::NotAFunction {
                type_name: function.type_name(),
            }
            .into();
        }

        match self.eval_expressions(&call.arguments, env) {
            Ok(args) => self.apply_function(function, args),
            Err(obj) => obj,
        }
    }

    pub fn apply_function(&mut self, function: Object, args: Vec<Object>) -> Object {
        match function {
            Object::Function(func) => self.call_function(&func, args),
            Object::Builtin(builtin) => {
                trace!(name = builtin.name, "calling builtin");
                builtin.call(args).into()
            }
            obj => EvalError::NotAFunction {
                type_name: obj.type_name(),
            }
            .into(),
        }
    }

    fn call_function(&mut self, func: &FunctionObject, args: Vec<Object>) -> Object {
        if func.parameters.len() != args.len() {
            return EvalError::IncorrectArity {
                got: args.len(),
                want: func.parameters.len(),
            }
            .into();
        }

        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                debug!(limit, "call depth limit reached");
                return EvalError::CallDepthExceeded { limit }.into();
            }
        }

        let call_env = Environment::enclosed(&func.env);
        {
            let mut scope = call_env.borrow_mut();
            for (param, arg) in func.parameters.iter().zip(args) {
                scope.set(&param.value, arg);
            }
        }

        self.depth += 1;
        trace!(depth = self.depth, "calling function");
        let result = self.eval_block(&func.body, &call_env);
        self.depth -= 1;

        result.unwrap_return()
    }

    fn eval_hash_literal(&mut self, hash: &ast::HashLiteral, env: &Env) -> Object {
        let mut value = HashValue::default();

        for (key_expr, value_expr) in hash.pairs.iter() {
            let key = propagate!(self.eval_expression(key_expr, env));
            let pair_value = propagate!(self.eval_expression(value_expr, env));
            if let Err(err) = value.insert(key, pair_value) {
                return err.into();
            }
        }

        value.into()
    }
}

fn eval_prefix_expression(operator: ast::Operator, right: Object) -> Result<Object> {
    match (operator, right) {
        (ast::Operator::Bang, right) => Ok((!right.truth_value()).into()),
        (ast::Operator::Minus, Object::Integer(n)) => n
            .checked_neg()
            .map(Object::Integer)
            .ok_or(EvalError::NegationOverflow { operand: n }),
        (operator, right) => Err(EvalError::UnknownPrefixOperator {
            operator,
            operand: right.type_name(),
        }),
    }
}

fn eval_infix_expression(operator: ast::Operator, left: Object, right: Object) -> Result<Object> {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix_expression(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix_expression(operator, l, r),
        _ if left.type_name() == right.type_name() => match operator {
            ast::Operator::Eq => Ok((left == right).into()),
            ast::Operator::NotEq => Ok((left != right).into()),
            _ => Err(EvalError::binary_op_error(
                left.type_name(),
                operator,
                right.type_name(),
            )),
        },
        _ => Err(EvalError::binary_op_error(
            left.type_name(),
            operator,
            right.type_name(),
        )),
    }
}

fn eval_integer_infix_expression(operator: ast::Operator, left: i64, right: i64) -> Result<Object> {
    let overflow = || EvalError::IntegerOverflow {
        left,
        operator,
        right,
    };

    match operator {
        ast::Operator::Plus => left.checked_add(right).map(Object::Integer).ok_or_else(overflow),
        ast::Operator::Minus => left.checked_sub(right).map(Object::Integer).ok_or_else(overflow),
        ast::Operator::Asterisk => left.checked_mul(right).map(Object::Integer).ok_or_else(overflow),
        ast::Operator::Slash if right == 0 => Err(EvalError::DivisionByZero { left }),
        ast::Operator::Slash => left.checked_div(right).map(Object::Integer).ok_or_else(overflow),
        ast::Operator::LT => Ok((left < right).into()),
        ast::Operator::GT => Ok((left > right).into()),
        ast::Operator::LtEq => Ok((left <= right).into()),
        ast::Operator::GtEq => Ok((left >= right).into()),
        ast::Operator::Eq => Ok((left == right).into()),
        ast::Operator::NotEq => Ok((left != right).into()),
        ast::Operator::Bang => Err(EvalError::UnknownInfixOperator {
            left: "INTEGER",
            operator,
            right: "INTEGER",
        }),
    }
}

fn eval_string_infix_expression(operator: ast::Operator, left: &str, right: &str) -> Result<Object> {
    match operator {
        ast::Operator::Plus => Ok(format!("{}{}", left, right).into()),
        ast::Operator::Eq => Ok((left == right).into()),
        ast::Operator::NotEq => Ok((left != right).into()),
        _ => Err(EvalError::UnknownInfixOperator {
            left: "STRING",
            operator,
            right: "STRING",
        }),
    }
}

fn eval_index_expression(left: Object, index: Object) -> Result<Object> {
    match (left, index) {
        (Object::Array(elements), Object::Integer(i)) => Ok(usize::try_from(i)
            .ok()
            .and_then(|i| elements.into_iter().nth(i))
            .unwrap_or(NULL)),
        (Object::Array(_), index) => Err(EvalError::InvalidIndex {
            collection: "ARRAY",
            index: index.type_name(),
        }),
        (Object::Hash(hash), key) => Ok(hash.get(&key)?.cloned().unwrap_or(NULL)),
        (left, _) => Err(EvalError::NotIndexable {
            type_name: left.type_name(),
        }),
    }
}
