//! Boolean tag expressions such as `@smoke and not (@wip or @slow)`.
//!
//! Precedence from loosest to tightest is `or`, `and`, `not`; operators are
//! case-insensitive and parentheses group.

use std::collections::HashSet;
use std::fmt;

/// Parsed tag expression.
///
/// # Examples
///
/// ```
/// use cuke_runner::TagExpression;
///
/// let expr = TagExpression::parse("@a or @b and not @c")?;
/// assert!(expr.evaluate(["@a"]));
/// assert!(expr.evaluate(["@b"]));
/// assert!(!expr.evaluate(["@b", "@c"]));
/// # Ok::<(), cuke_runner::TagExprError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagExpression {
    source: String,
    root: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Expr {
    Tag(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, tags: &HashSet<&str>) -> bool {
        match self {
            Self::Tag(tag) => tags.contains(tag.as_str()),
            Self::Not(inner) => !inner.eval(tags),
            Self::And(lhs, rhs) => lhs.eval(tags) && rhs.eval(tags),
            Self::Or(lhs, rhs) => lhs.eval(tags) || rhs.eval(tags),
        }
    }
}

/// A tag expression that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tag expression at byte {offset}: {reason}")]
pub struct TagExprError {
    offset: usize,
    reason: String,
}

impl TagExprError {
    fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            offset,
            reason: reason.into(),
        }
    }

    /// Byte offset of the offending input.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl TagExpression {
    /// Parse `input`.
    ///
    /// # Errors
    ///
    /// Returns [`TagExprError`] describing the first offending byte.
    pub fn parse(input: &str) -> Result<Self, TagExprError> {
        let mut parser = Parser::new(input)?;
        let root = parser.parse_or()?;
        parser.expect_end()?;
        Ok(Self {
            source: input.trim().to_string(),
            root,
        })
    }

    /// Evaluate against a set of `@`-prefixed tags.
    pub fn evaluate<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let set: HashSet<&'a str> = tags.into_iter().collect();
        self.root.eval(&set)
    }
}

impl fmt::Display for TagExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, TagExprError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    fn advance(&mut self) -> Result<(), TagExprError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn parse_or(&mut self) -> Result<Expr, TagExprError> {
        let mut node = self.parse_and()?;
        while matches!(self.current.kind, TokenKind::Or) {
            self.advance()?;
            self.ensure_operand("or")?;
            let rhs = self.parse_and()?;
            node = Expr::Or(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn parse_and(&mut self) -> Result<Expr, TagExprError> {
        let mut node = self.parse_not()?;
        while matches!(self.current.kind, TokenKind::And) {
            self.advance()?;
            self.ensure_operand("and")?;
            let rhs = self.parse_not()?;
            node = Expr::And(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn parse_not(&mut self) -> Result<Expr, TagExprError> {
        if matches!(self.current.kind, TokenKind::Not) {
            self.advance()?;
            let operand = self.parse_not()?;
            return Ok(Expr::Not(Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, TagExprError> {
        let start = self.current.start;
        match std::mem::replace(&mut self.current.kind, TokenKind::End) {
            TokenKind::Tag(tag) => {
                self.advance()?;
                Ok(Expr::Tag(tag))
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_or()?;
                if matches!(self.current.kind, TokenKind::RParen) {
                    self.advance()?;
                    Ok(expr)
                } else {
                    Err(TagExprError::new(start, "missing ')'"))
                }
            }
            TokenKind::End => Err(TagExprError::new(start, "expected tag or '('")),
            other => Err(TagExprError::new(
                start,
                format!("expected tag or '(' but found {}", other.describe()),
            )),
        }
    }

    fn ensure_operand(&self, name: &str) -> Result<(), TagExprError> {
        match self.current.kind {
            TokenKind::Or | TokenKind::And | TokenKind::RParen | TokenKind::End => {
                Err(TagExprError::new(
                    self.current.start,
                    format!("expected tag or '(' after '{name}'"),
                ))
            }
            _ => Ok(()),
        }
    }

    fn expect_end(&self) -> Result<(), TagExprError> {
        if matches!(self.current.kind, TokenKind::End) {
            Ok(())
        } else {
            Err(TagExprError::new(
                self.current.start,
                format!("unexpected token {}", self.current.kind.describe()),
            ))
        }
    }
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    start: usize,
}

#[derive(Clone, Debug)]
enum TokenKind {
    Tag(String),
    And,
    Or,
    Not,
    LParen,
    RParen,
    End,
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            Self::Tag(tag) => tag.clone(),
            Self::And => "'and'".to_string(),
            Self::Or => "'or'".to_string(),
            Self::Not => "'not'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::End => "<end>".to_string(),
        }
    }
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn next_token(&mut self) -> Result<Token, TagExprError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(ch) = self.bump_char() else {
            return Ok(Token {
                kind: TokenKind::End,
                start,
            });
        };
        let kind = match ch {
            '@' => self.lex_tag(start)?,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            c if c.is_ascii_alphabetic() => self.lex_keyword(start)?,
            other => {
                return Err(TagExprError::new(
                    start,
                    format!("unexpected character '{other}'"),
                ));
            }
        };
        Ok(Token { kind, start })
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos..).and_then(|s| s.chars().next())
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn bump_while(&mut self, accept: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if !accept(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn slice(&self, start: usize) -> Result<&'a str, TagExprError> {
        self.input
            .get(start..self.pos)
            .ok_or_else(|| TagExprError::new(start, "invalid token boundaries"))
    }

    fn lex_tag(&mut self, start: usize) -> Result<TokenKind, TagExprError> {
        if !self.peek_char().is_some_and(is_tag_char) {
            return Err(TagExprError::new(start + 1, "expected tag name after '@'"));
        }
        self.bump_while(is_tag_char);
        Ok(TokenKind::Tag(self.slice(start)?.to_string()))
    }

    fn lex_keyword(&mut self, start: usize) -> Result<TokenKind, TagExprError> {
        self.bump_while(|ch| ch.is_ascii_alphabetic());
        let keyword = self.slice(start)?;
        match keyword.to_ascii_lowercase().as_str() {
            "and" => Ok(TokenKind::And),
            "or" => Ok(TokenKind::Or),
            "not" => Ok(TokenKind::Not),
            _ => Err(TagExprError::new(
                start,
                format!("unexpected identifier '{keyword}'"),
            )),
        }
    }
}

fn is_tag_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.')
}

#[cfg(test)]
mod tests {
    use super::TagExpression;
    use rstest::rstest;

    fn parse_expression(input: &str) -> TagExpression {
        TagExpression::parse(input).unwrap_or_else(|err| panic!("parse expression `{input}`: {err}"))
    }

    fn parse_error_message(input: &str) -> String {
        match TagExpression::parse(input) {
            Ok(expr) => panic!("expected parse error for `{input}`, got {expr:?}"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn evaluates_simple_tag() {
        let expr = parse_expression("@fast");
        assert!(expr.evaluate(["@fast"]));
        assert!(!expr.evaluate(["@slow"]));
    }

    #[test]
    fn honours_operator_precedence() {
        let expr = parse_expression("@a or @b and @c");
        assert!(expr.evaluate(["@a"]));
        assert!(expr.evaluate(["@b", "@c"]));
        assert!(!expr.evaluate(["@b"]));
    }

    #[test]
    fn parses_nested_parentheses() {
        let expr = parse_expression("not (@a or @b)");
        assert!(!expr.evaluate(["@a"]));
        assert!(!expr.evaluate(["@b"]));
        assert!(expr.evaluate(["@c"]));
    }

    #[test]
    fn operators_are_case_insensitive() {
        let expr = parse_expression("@a Or nOt @b");
        assert!(expr.evaluate(["@a"]));
        assert!(expr.evaluate(["@c"]));
        assert!(!expr.evaluate(["@b"]));
    }

    #[test]
    fn display_echoes_trimmed_source() {
        assert_eq!(parse_expression("  @a and @b ").to_string(), "@a and @b");
    }

    #[rstest]
    #[case("@a and", "expected tag or '(' after 'and'")]
    #[case("@a && @b", "unexpected character '&'")]
    #[case("", "expected tag or '('")]
    #[case("(@a or @b", "missing ')'")]
    #[case("@a @b", "unexpected token @b")]
    #[case("@", "expected tag name after '@'")]
    #[case("@a xor @b", "unexpected identifier 'xor'")]
    fn reports_parse_errors(#[case] input: &str, #[case] expected: &str) {
        let err = parse_error_message(input);
        assert!(err.contains(expected), "unexpected error message: {err}");
    }
}
