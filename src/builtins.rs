use crate::object::*;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

pub type BuiltinFn = fn(Vec<Object>) -> Result<Object>;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    func: BuiltinFn,
}

impl Builtin {
    pub fn new(name: &'static str, func: BuiltinFn) -> Self {
        Self { name, func }
    }

    pub fn call(&self, args: Vec<Object>) -> Result<Object> {
        (self.func)(args)
    }
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[derive(Debug, Clone, Default)]
pub struct Builtins {
    table: HashMap<&'static str, Builtin>,
}

impl Builtins {
    pub fn standard() -> Self {
        vec![
            Builtin::new("len", len),
            Builtin::new("first", first),
            Builtin::new("last", last),
            Builtin::new("tail", tail),
            Builtin::new("push", push),
        ]
        .into_iter()
        .collect()
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        self.table.get(name).copied().map(Object::Builtin)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }
}

impl std::iter::FromIterator<Builtin> for Builtins {
    fn from_iter<I: IntoIterator<Item = Builtin>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().map(|b| (b.name, b)).collect(),
        }
    }
}

lazy_static! {
    pub static ref BUILTINS: Builtins = Builtins::standard();
}

fn check_arity(args: &[Object], want: usize) -> Result<()> {
    if args.len() != want {
        return Err(EvalError::IncorrectArity {
            got: args.len(),
            want,
        });
    }
    Ok(())
}

fn single_argument(args: Vec<Object>) -> Result<Object> {
    check_arity(&args, 1)?;
    Ok(args.into_iter().next().unwrap_or_default())
}

fn len(args: Vec<Object>) -> Result<Object> {
    match single_argument(args)? {
        Object::String(s) => Ok(Object::Integer(s.len() as i64)),
        Object::Array(a) => Ok(Object::Integer(a.len() as i64)),
        obj => Err(EvalError::UnsupportedArgType {
            fn_name: "len",
            type_name: obj.type_name(),
        }),
    }
}

fn first(args: Vec<Object>) -> Result<Object> {
    match single_argument(args)? {
        Object::String(s) => Ok(s.chars().next().map_or(NULL, |c| c.to_string().into())),
        Object::Array(a) => Ok(a.into_iter().next().unwrap_or(NULL)),
        obj => Err(EvalError::UnsupportedArgType {
            fn_name: "first",
            type_name: obj.type_name(),
        }),
    }
}

fn last(args: Vec<Object>) -> Result<Object> {
    match single_argument(args)? {
        Object::String(s) => Ok(s.chars().last().map_or(NULL, |c| c.to_string().into())),
        Object::Array(a) => Ok(a.into_iter().last().unwrap_or(NULL)),
        obj => Err(EvalError::UnsupportedArgType {
            fn_name: "last",
            type_name: obj.type_name(),
        }),
    }
}

fn tail(args: Vec<Object>) -> Result<Object> {
    match single_argument(args)? {
        Object::String(s) if s.is_empty() => Ok(NULL),
        Object::String(s) => Ok(s.chars().skip(1).collect::<String>().into()),
        Object::Array(a) if a.is_empty() => Ok(NULL),
        Object::Array(a) => Ok(a.into_iter().skip(1).collect::<Vec<_>>().into()),
        obj => Err(EvalError::UnsupportedArgType {
            fn_name: "tail",
            type_name: obj.type_name(),
        }),
    }
}

fn push(args: Vec<Object>) -> Result<Object> {
    check_arity(&args, 2)?;

    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(Object::Array(mut a)), Some(obj)) => {
            a.push(obj);
            Ok(a.into())
        }
        (Some(obj), _) => Err(EvalError::ExpectedArray {
            fn_name: "push",
            type_name: obj.type_name(),
        }),
        (None, _) => Err(EvalError::IncorrectArity { got: 0, want: 2 }),
    }
}
