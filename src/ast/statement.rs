use super::{Expression, Identifier, Node};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expr(ExpressionStatement),
    Block(BlockStatement),
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Let(stmt) => write!(f, "{}", stmt),
            Self::Return(stmt) => write!(f, "{}", stmt),
            Self::Expr(stmt) => write!(f, "{}", stmt),
            Self::Block(stmt) => write!(f, "{}", stmt.braced()),
        }
    }
}

impl Node for Statement {
    fn token_literal(&self) -> String {
        match self {
            Self::Let(stmt) => stmt.token_literal(),
            Self::Return(stmt) => stmt.token_literal(),
            Self::Expr(stmt) => stmt.token_literal(),
            Self::Block(stmt) => stmt.token_literal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub name: Identifier,
    pub value: Expression,
}

impl Display for LetStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} = {};",
            self.token_literal(),
            self.name,
            self.value
        )
    }
}

impl Node for LetStatement {
    fn token_literal(&self) -> String {
        "let".to_owned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub return_value: Expression,
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {};", self.token_literal(), self.return_value)
    }
}

impl Node for ReturnStatement {
    fn token_literal(&self) -> String {
        "return".to_owned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

impl Node for ExpressionStatement {
    fn token_literal(&self) -> String {
        self.expression.token_literal()
    }
}

/// A `{ ... }` sequence of statements. `Display` renders only the
/// statements; [`BlockStatement::braced`] adds the delimiters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn braced(&self) -> String {
        if self.statements.is_empty() {
            "{}".to_owned()
        } else {
            format!("{{ {} }}", self)
        }
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let last = self.statements.len().saturating_sub(1);
        for (i, stmt) in self.statements.iter().enumerate() {
            write!(f, "{}", stmt)?;
            if i < last {
                // Keep adjacent expressions from reading as a call on re-parse.
                if let Statement::Expr(_) = stmt {
                    write!(f, ";")?;
                }
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

impl Node for BlockStatement {
    fn token_literal(&self) -> String {
        "{".to_owned()
    }
}

impl From<Vec<Statement>> for BlockStatement {
    fn from(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}
