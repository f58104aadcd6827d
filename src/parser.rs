use crate::symbols::Variable;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::iter::Peekable;
use std::slice::Iter;
use thiserror::Error;

lazy_static! {
    static ref TOKENIZER: Regex = Regex::new(
        r"(?P<space>\s+)|(?P<symbol>>>|<<|&|\||~)|(?P<identifier>\w+)|(?P<open>\()|(?P<close>\))|(?P<other>(?s:.))"
    )
    .expect("tokenizer pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Var(Variable),
    Const(bool),
    And,
    Or,
    Not,
    Implies,
    Equivalent,
    OpenParen,
    CloseParen,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(v) => write!(f, "{v}"),
            Self::Const(true) => f.write_str("True"),
            Self::Const(false) => f.write_str("False"),
            Self::And => f.write_str("&"),
            Self::Or => f.write_str("|"),
            Self::Not => f.write_str("~"),
            Self::Implies => f.write_str(">>"),
            Self::Equivalent => f.write_str("<<"),
            Self::OpenParen => f.write_str("("),
            Self::CloseParen => f.write_str(")"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Implies,
    Equivalent,
}

impl BinaryOperator {
    pub const fn token(self) -> Token {
        match self {
            Self::And => Token::And,
            Self::Or => Token::Or,
            Self::Implies => Token::Implies,
            Self::Equivalent => Token::Equivalent,
        }
    }

    /// Applies the connective to two truth values. Both operands are
    /// always evaluated by the caller; nothing short-circuits.
    pub const fn apply(self, l: bool, r: bool) -> bool {
        match self {
            Self::And => l & r,
            Self::Or => l | r,
            Self::Implies => !l | r,
            Self::Equivalent => l == r,
        }
    }
}

/// Abstract syntax tree of a propositional formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Const(bool),
    Var(Variable),
    Not(Box<Expression>),
    BinaryOp(BinaryOperator, Box<Expression>, Box<Expression>),
}

impl Expression {
    /// Distinct variables occurring in the tree, sorted by name.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.into_iter().sorted().dedup().collect()
    }

    fn collect_variables(&self, vars: &mut Vec<Variable>) {
        match self {
            Self::Const(_) => {}
            Self::Var(v) => vars.push(*v),
            Self::Not(f) => f.collect_variables(vars),
            Self::BinaryOp(_, l, r) => {
                l.collect_variables(vars);
                r.collect_variables(vars);
            }
        }
    }
}

/// Prints fully parenthesised canonical text; the output parses back to an
/// equal tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(c) => write!(f, "{}", Token::Const(*c)),
            Self::Var(v) => write!(f, "{v}"),
            Self::Not(e) => write!(f, "~{e}"),
            Self::BinaryOp(op, l, r) => write!(f, "({l} {} {r})", op.token()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("empty expression")]
    Empty,
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),
    #[error("unbalanced parentheses: `(` is never closed")]
    UnclosedParenthesis,
    #[error("unbalanced parentheses: unmatched `)`")]
    UnmatchedParenthesis,
    #[error("missing operand, found {0}")]
    MissingOperand(String),
    #[error("unexpected `{0}`")]
    UnexpectedToken(String),
    #[error("expression is nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Syntax error in an expression. `position` is the byte offset into the
/// canonical text at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    const fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Limit on the nesting of parentheses, negations and chained binary
/// connectives. Deeper input fails with [`ParseErrorKind::TooDeep`].
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFormula {
    /// Canonical text the formula was parsed from, trimmed.
    pub text: String,
    /// Distinct variables of the formula, sorted by name.
    pub vars: Vec<Variable>,
    pub expr: Expression,
}

type TokenReader<'a> = Peekable<Iter<'a, (Token, usize)>>;

impl ParsedFormula {
    pub fn new(text: &str) -> ParseResult<Self> {
        let text = text.trim();
        let tokens = tokenize(text)?;

        log::trace!("tokens of {text:?}: {tokens:?}");

        let expr = parse_formula(&mut tokens.iter().peekable())?;
        let vars = expr.variables();

        log::debug!(
            "parsed {text:?} with variables [{}]",
            vars.iter().join(", ")
        );

        Ok(Self {
            text: text.to_string(),
            vars,
            expr,
        })
    }
}

/// Parses canonical token text (see [`crate::translate::to_canonical`]).
pub fn parse(text: &str) -> ParseResult<ParsedFormula> {
    ParsedFormula::new(text)
}

/// Splits `src` into tokens paired with their byte offset. The result always
/// ends with [`Token::Eof`].
pub fn tokenize(src: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut result = Vec::new();

    for c in TOKENIZER.captures_iter(src) {
        if c.name("space").is_some() {
            continue;
        } else if let Some(symbol) = c.name("symbol") {
            let token = match symbol.as_str() {
                "&" => Token::And,
                "|" => Token::Or,
                "~" => Token::Not,
                ">>" => Token::Implies,
                "<<" => Token::Equivalent,
                other => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnknownSymbol(other.to_string()),
                        symbol.start(),
                    ))
                }
            };
            result.push((token, symbol.start()));
        } else if let Some(identifier) = c.name("identifier") {
            let token = match identifier.as_str() {
                "True" | "true" => Token::Const(true),
                "False" | "false" => Token::Const(false),
                name => single_char(name)
                    .and_then(Variable::from_name)
                    .map(Token::Var)
                    .ok_or_else(|| {
                        ParseError::new(
                            ParseErrorKind::UnknownSymbol(name.to_string()),
                            identifier.start(),
                        )
                    })?,
            };
            result.push((token, identifier.start()));
        } else if let Some(open) = c.name("open") {
            result.push((Token::OpenParen, open.start()));
        } else if let Some(close) = c.name("close") {
            result.push((Token::CloseParen, close.start()));
        } else if let Some(other) = c.name("other") {
            return Err(ParseError::new(
                ParseErrorKind::UnknownSymbol(other.as_str().to_string()),
                other.start(),
            ));
        }
    }

    result.push((Token::Eof, src.len()));

    Ok(result)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

// formula     := conditional EOF
// conditional := disjunction [('>>' | '<<') conditional]
// disjunction := conjunction ('|' conjunction)*
// conjunction := negation ('&' negation)*
// negation    := '~' negation | atom
// atom        := VAR | CONST | '(' conditional ')'

fn parse_formula(tokens: &mut TokenReader) -> ParseResult<Expression> {
    if let Some((Token::Eof, position)) = tokens.peek() {
        return Err(ParseError::new(ParseErrorKind::Empty, *position));
    }

    let result = parse_conditional(tokens, 0)?;

    match tokens.next() {
        Some((Token::Eof, _)) => Ok(result),
        Some((Token::CloseParen, position)) => Err(ParseError::new(
            ParseErrorKind::UnmatchedParenthesis,
            *position,
        )),
        Some((other, position)) => Err(ParseError::new(
            ParseErrorKind::UnexpectedToken(other.to_string()),
            *position,
        )),
        None => Ok(result),
    }
}

/// One level deeper, or [`ParseErrorKind::TooDeep`] at `position`.
fn descend(depth: usize, position: usize) -> ParseResult<usize> {
    if depth >= MAX_DEPTH {
        return Err(ParseError::new(ParseErrorKind::TooDeep(MAX_DEPTH), position));
    }
    Ok(depth + 1)
}

fn parse_conditional(tokens: &mut TokenReader, depth: usize) -> ParseResult<Expression> {
    let left = parse_disjunction(tokens, depth)?;

    let (op, position) = match tokens.peek() {
        Some((Token::Implies, position)) => (BinaryOperator::Implies, *position),
        Some((Token::Equivalent, position)) => (BinaryOperator::Equivalent, *position),
        _ => return Ok(left),
    };
    let depth = descend(depth, position)?;
    tokens.next();

    // right associative: a >> b >> c == a >> (b >> c)
    let right = parse_conditional(tokens, depth)?;
    Ok(Expression::BinaryOp(op, Box::new(left), Box::new(right)))
}

fn parse_disjunction(tokens: &mut TokenReader, depth: usize) -> ParseResult<Expression> {
    let mut depth = depth;
    let mut left = parse_conjunction(tokens, depth)?;

    while let Some((Token::Or, position)) = tokens.peek() {
        depth = descend(depth, *position)?;
        tokens.next();
        let right = parse_conjunction(tokens, depth)?;
        left = Expression::BinaryOp(BinaryOperator::Or, Box::new(left), Box::new(right));
    }

    Ok(left)
}

fn parse_conjunction(tokens: &mut TokenReader, depth: usize) -> ParseResult<Expression> {
    let mut depth = depth;
    let mut left = parse_negation(tokens, depth)?;

    while let Some((Token::And, position)) = tokens.peek() {
        depth = descend(depth, *position)?;
        tokens.next();
        let right = parse_negation(tokens, depth)?;
        left = Expression::BinaryOp(BinaryOperator::And, Box::new(left), Box::new(right));
    }

    Ok(left)
}

fn parse_negation(tokens: &mut TokenReader, depth: usize) -> ParseResult<Expression> {
    if let Some((Token::Not, position)) = tokens.peek() {
        let depth = descend(depth, *position)?;
        tokens.next();
        let negated = parse_negation(tokens, depth)?;
        return Ok(Expression::Not(Box::new(negated)));
    }

    parse_atom(tokens, depth)
}

fn parse_atom(tokens: &mut TokenReader, depth: usize) -> ParseResult<Expression> {
    match tokens.next() {
        Some((Token::Var(v), _)) => Ok(Expression::Var(*v)),
        Some((Token::Const(c), _)) => Ok(Expression::Const(*c)),
        Some((Token::OpenParen, position)) => parse_parenthesized(tokens, descend(depth, *position)?),
        Some((Token::Eof, position)) => Err(ParseError::new(
            ParseErrorKind::MissingOperand(Token::Eof.to_string()),
            *position,
        )),
        Some((other, position)) => Err(ParseError::new(
            ParseErrorKind::MissingOperand(format!("`{other}`")),
            *position,
        )),
        None => Err(ParseError::new(
            ParseErrorKind::MissingOperand(Token::Eof.to_string()),
            0,
        )),
    }
}

fn parse_parenthesized(tokens: &mut TokenReader, depth: usize) -> ParseResult<Expression> {
    let subform = parse_conditional(tokens, depth)?;

    match tokens.next() {
        Some((Token::CloseParen, _)) => Ok(subform),
        Some((Token::Eof, position)) => Err(ParseError::new(
            ParseErrorKind::UnclosedParenthesis,
            *position,
        )),
        Some((other, position)) => Err(ParseError::new(
            ParseErrorKind::UnexpectedToken(other.to_string()),
            *position,
        )),
        None => Err(ParseError::new(ParseErrorKind::UnclosedParenthesis, 0)),
    }
}

// Accepted syntax, canonical notation:
// A
// A & B
// A | B
// ~A
// A >> B
// A << B
// (A & B) | C
// A & B | C       == (A & B) | C
// ~A & B          == (~A) & B
// A | B >> C      == (A | B) >> C
// A >> B >> C     == A >> (B >> C)
// True, False

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn single_char_names() {
        assert_eq!(single_char("A"), Some('A'));
        assert_eq!(single_char("AB"), None);
        assert_eq!(single_char(""), None);
    }

    #[test]
    fn constants() -> ParseResult<()> {
        assert_eq!(parse("True")?.expr, Expression::Const(true));
        assert_eq!(parse("false")?.expr, Expression::Const(false));
        assert_eq!(
            parse("~TRUE").map_err(|e| e.kind),
            Err(ParseErrorKind::UnknownSymbol("TRUE".to_string()))
        );
        Ok(())
    }

    #[test]
    fn connectives() {
        for (l, r) in [(true, true), (true, false), (false, true), (false, false)] {
            assert_eq!(BinaryOperator::And.apply(l, r), l && r);
            assert_eq!(BinaryOperator::Or.apply(l, r), l || r);
            assert_eq!(BinaryOperator::Implies.apply(l, r), !l || r);
            assert_eq!(BinaryOperator::Equivalent.apply(l, r), l == r);
        }
    }

    #[test]
    fn trims_input() -> ParseResult<()> {
        let formula = parse("  A | B \n")?;
        assert_eq!(formula.text, "A | B");
        Ok(())
    }
}
