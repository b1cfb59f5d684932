use crate::builtins::BUILTINS;
use crate::config::Config;
use crate::environment::{Env, Environment};
use crate::evaluator::Evaluator;
use crate::object::Object;
use crate::parser::{self, ParseError};

pub struct Interpreter {
    env: Env,
    evaluator: Evaluator<'static>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Interpreter {
    pub fn new(config: &Config) -> Self {
        Self {
            env: Environment::root(),
            evaluator: Evaluator::new(&BUILTINS).with_max_depth(config.max_depth),
        }
    }

    pub fn run(&mut self, input: &str) -> Result<Option<Object>, Vec<ParseError>> {
        let program = parser::parse(input)?;
        Ok(self.evaluator.eval_program(&program, &self.env))
    }

    pub fn env(&self) -> &Env {
        &self.env
    }
}
