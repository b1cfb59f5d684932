use crate::token::Token;

pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_token())
    }
}

impl Lexer {
    pub fn new(input: String) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = *self.input.as_bytes().get(self.read_position).unwrap_or(&0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        *self.input.as_bytes().get(self.read_position).unwrap_or(&0)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Emits `double` if the next character is `=`, `single` otherwise.
    fn with_assign(&mut self, single: Token, double: Token) -> Token {
        if self.peek_char() == b'=' {
            self.read_char();
            double
        } else {
            single
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        if self.at_end() {
            return Token::Eof;
        }

        let token = match self.ch {
            b'=' => self.with_assign(Token::Assign, Token::Eq),
            b'!' => self.with_assign(Token::Bang, Token::NotEq),
            b'<' => self.with_assign(Token::LT, Token::LtEq),
            b'>' => self.with_assign(Token::GT, Token::GtEq),
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Asterisk,
            b'/' => Token::Slash,
            b';' => Token::Semicolon,
            b':' => Token::Colon,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b',' => Token::Comma,
            b'{' => Token::LBrace,
            b'}' => Token::RBrace,
            b'[' => Token::LBracket,
            b']' => Token::RBracket,
            b'"' => Token::String(self.read_string()),
            c => {
                if is_letter(c) {
                    return self.read_identifier().into();
                } else if c.is_ascii_digit() {
                    return Token::Int(self.read_number().to_owned());
                } else {
                    Token::Illegal(c)
                }
            }
        };
        self.read_char();
        token
    }

    fn read_identifier(&mut self) -> &str {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn read_number(&mut self) -> &str {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    // Leaves the lexer on the closing quote, or at end of input if there is none.
    fn read_string(&mut self) -> String {
        let mut bytes = Vec::new();
        loop {
            self.read_char();
            if self.at_end() || self.ch == b'"' {
                break;
            }
            if self.ch == b'\\' && self.read_position < self.input.len() {
                self.read_char();
                bytes.push(match self.ch {
                    b'n' => b'\n',
                    b't' => b'\t',
                    b'r' => b'\r',
                    other => other,
                });
            } else {
                bytes.push(self.ch);
            }
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }
}
