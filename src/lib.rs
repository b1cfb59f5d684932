pub mod ast;
pub mod builtins;
pub mod config;
pub mod environment;
pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
mod stack;
pub mod token;

pub use config::Config;
pub use environment::{Env, Environment};
pub use evaluator::{eval, Evaluator};
pub use interpreter::Interpreter;
pub use lexer::Lexer;
pub use object::Object;
pub use parser::{parse, Parser};
