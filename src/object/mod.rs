use crate::ast;
use crate::builtins::Builtin;
use crate::environment::Env;
use crate::stack::ensure_sufficient_stack;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

mod eval_error;
pub use eval_error::EvalError;

mod hash;
pub use hash::{HashKey, HashKind, HashPair, HashValue};

pub type Result<T> = std::result::Result<T, EvalError>;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// A runtime value.
///
/// `ReturnValue` and `Error` are control-flow sentinels: blocks stop at the
/// first of either and hand it upwards unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    ReturnValue(Box<Object>),
    Error(EvalError),
    Function(FunctionObject),
    Builtin(Builtin),
    Array(Vec<Object>),
    Hash(HashValue),
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::String(s) => write!(f, "{}", s),
            Self::Null => write!(f, "null"),
            Self::ReturnValue(obj) => write!(f, "{}", obj),
            Self::Error(err) => write!(f, "Error: {}", err),
            Self::Function(func) => write!(f, "{}", func),
            Self::Builtin(_) => write!(f, "builtin function"),
            Self::Array(a) => {
                let element_names: Vec<String> = a.iter().map(Object::to_string).collect();

                write!(f, "[{}]", element_names.join(", "))
            }
            Self::Hash(h) => write!(f, "{}", h),
        })
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::Null
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        if b {
            TRUE
        } else {
            FALSE
        }
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl From<Vec<Object>> for Object {
    fn from(a: Vec<Object>) -> Self {
        Self::Array(a)
    }
}

impl From<HashValue> for Object {
    fn from(h: HashValue) -> Self {
        Self::Hash(h)
    }
}

impl From<EvalError> for Object {
    fn from(err: EvalError) -> Self {
        Self::Error(err)
    }
}

impl From<Result<Object>> for Object {
    fn from(result: Result<Object>) -> Self {
        result.unwrap_or_else(Self::Error)
    }
}

impl Object {
    pub fn is_return_value(&self) -> bool {
        matches!(self, Self::ReturnValue(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn unwrap_return(self) -> Self {
        match self {
            Self::ReturnValue(o) => *o,
            obj => obj,
        }
    }

    /// The text the read-eval-print loop shows for this value.
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Boolean(_) => "BOOLEAN",
            Self::String(_) => "STRING",
            Self::Null => "NULL",
            Self::ReturnValue(_) => "RETURN_VALUE",
            Self::Error(_) => "ERROR",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
            Self::Array(_) => "ARRAY",
            Self::Hash(_) => "HASH",
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn truth_value(&self) -> bool {
        !matches!(self, Self::Boolean(false) | Self::Null)
    }
}

/// A closure: parameters and body of a function literal together with the
/// environment it was evaluated in.
#[derive(Clone)]
pub struct FunctionObject {
    pub parameters: Vec<ast::Identifier>,
    pub body: Rc<ast::BlockStatement>,
    pub env: Env,
}

impl Display for FunctionObject {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let identifier_names: Vec<String> = self
            .parameters
            .iter()
            .map(ast::Identifier::to_string)
            .collect();

        write!(f, "fn({}) {{\n{}\n}}", identifier_names.join(", "), self.body)
    }
}

// The captured environment can hold this function, so it is left out.
impl Debug for FunctionObject {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FunctionObject")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish()
    }
}

/// Functions are equal only to themselves: the same literal closed over the
/// same environment.
impl PartialEq for FunctionObject {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.env, &other.env)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::environment::Environment;

    #[test]
    fn test_inspect() {
        let mut hash = HashValue::default();
        hash.insert("one".into(), 1.into()).unwrap();

        let cases = vec![
            (Object::Integer(-12), "-12"),
            (TRUE, "true"),
            (FALSE, "false"),
            (NULL, "null"),
            (Object::from("raw text"), "raw text"),
            (
                Object::Error(EvalError::IdentifierNotFound {
                    id: "foobar".to_owned(),
                }),
                "Error: identifier not found: foobar",
            ),
            (
                Object::Array(vec![1.into(), "two".into(), NULL]),
                "[1, two, null]",
            ),
            (Object::Array(vec![]), "[]"),
            (hash.into(), "{one: 1}"),
            (Object::ReturnValue(Box::new(5.into())), "5"),
        ];

        for (obj, expected) in cases.iter() {
            assert_eq!(obj.inspect(), *expected);
        }
    }

    #[test]
    fn test_function_inspect() {
        let body = ast::BlockStatement {
            statements: vec![ast::Statement::Expr(ast::ExpressionStatement {
                expression: ast::Expression::Infix(ast::InfixExpression {
                    left: Box::new(ast::Expression::Identifier("x".into())),
                    operator: ast::Operator::Plus,
                    right: Box::new(ast::Expression::IntegerLiteral(2)),
                }),
            })],
        };
        let func = Object::Function(FunctionObject {
            parameters: vec!["x".into(), "y".into()],
            body: Rc::new(body),
            env: Environment::root(),
        });

        assert_eq!(func.inspect(), "fn(x, y) {\n(x + 2)\n}");
        assert_eq!(func.type_name(), "FUNCTION");
    }

    #[test]
    fn test_function_identity() {
        let body = Rc::new(ast::BlockStatement::default());
        let env = Environment::root();
        let make = |env: &Env| FunctionObject {
            parameters: vec![],
            body: Rc::clone(&body),
            env: Rc::clone(env),
        };

        assert_eq!(make(&env), make(&env));
        assert_ne!(make(&env), make(&Environment::root()));
    }

    #[test]
    fn test_truth_value() {
        assert!(!FALSE.truth_value());
        assert!(!NULL.truth_value());
        assert!(TRUE.truth_value());
        assert!(Object::Integer(0).truth_value());
        assert!(Object::from("").truth_value());
        assert!(Object::Array(vec![]).truth_value());
    }

    #[test]
    fn test_from_result() {
        let ok: Result<Object> = Ok(3.into());
        let err: Result<Object> = Err(EvalError::NotAFunction { type_name: "INTEGER" });

        assert_eq!(Object::from(ok), Object::Integer(3));
        assert!(Object::from(err).is_error());
    }
}
