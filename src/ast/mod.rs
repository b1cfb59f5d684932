mod expression;
mod statement;
pub use expression::*;
pub use statement::*;

use std::fmt::{Display, Formatter};

/// Shared capabilities of every syntax tree node: the literal text of the
/// token that introduced it, and a source-like rendering via `Display`.
pub trait Node: Display {
    fn token_literal(&self) -> String;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for stmt in self.statements.iter() {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl Node for Program {
    fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Node::token_literal)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub value: String,
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Node for Identifier {
    fn token_literal(&self) -> String {
        self.value.clone()
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self { value }
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        value.to_owned().into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[test]
    fn test_display() {
        let program = Program {
            statements: vec![Statement::Let(LetStatement {
                name: "myVar".into(),
                value: Expression::Identifier("anotherVar".into()),
            })],
        };

        assert_eq!(format!("{}", program), "let myVar = anotherVar;");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn test_display_nested() {
        let body = BlockStatement {
            statements: vec![
                Statement::Let(LetStatement {
                    name: "z".into(),
                    value: Expression::IntegerLiteral(1),
                }),
                Statement::Expr(ExpressionStatement {
                    expression: Expression::Infix(InfixExpression {
                        left: Box::new(Expression::Identifier("x".into())),
                        operator: Operator::Plus,
                        right: Box::new(Expression::Identifier("y".into())),
                    }),
                }),
                Statement::Expr(ExpressionStatement {
                    expression: Expression::String(StringLiteral {
                        value: "say \"hi\"".to_owned(),
                    }),
                }),
            ],
        };
        let function = Expression::Function(FunctionLiteral {
            parameters: vec!["x".into(), "y".into()],
            body: Rc::new(body),
        });

        assert_eq!(
            function.to_string(),
            r#"fn(x, y) { let z = 1; (x + y); "say \"hi\"" }"#
        );
        assert_eq!(function.token_literal(), "fn");
    }

    #[test]
    fn test_empty_program() {
        let program = Program::default();
        assert_eq!(program.to_string(), "");
        assert_eq!(program.token_literal(), "");
    }
}
