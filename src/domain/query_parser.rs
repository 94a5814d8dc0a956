//! Screening query parser.
//!
//! Converts query text such as
//!
//! ```text
//! Market Capitalization > 10000 AND
//! ROE > 15
//! ```
//!
//! into an ordered list of [`Condition`]s. Clauses are separated by line breaks
//! or by the standalone word `AND` (any case). Each clause has the shape
//! `<field label> <op> <number>` where `<op>` is one of `>`, `<`, `=`. Clauses
//! that do not match, or that name an unknown field, are dropped; parsing a
//! whole query never fails.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::domain::condition::{Condition, Operator, Query};
use crate::domain::error::ParseError;
use crate::domain::stock::Metric;

static FIELD_LABELS: LazyLock<HashMap<&'static str, Metric>> =
    LazyLock::new(|| Metric::ALL.into_iter().map(|m| (m.label(), m)).collect());

/// Resolve a human field label (case-insensitive, surrounding whitespace ignored).
pub fn lookup_field(name: &str) -> Option<Metric> {
    FIELD_LABELS.get(name.trim().to_lowercase().as_str()).copied()
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Case-insensitive keyword match that must stand alone as a word.
    fn peek_keyword(&self, keyword: &str) -> bool {
        let preceded_by_word = self.input[..self.pos]
            .chars()
            .next_back()
            .is_some_and(is_word_char);
        if preceded_by_word {
            return false;
        }

        let remaining = self.remaining();
        match remaining.get(..keyword.len()) {
            Some(head) if head.eq_ignore_ascii_case(keyword) => !remaining[keyword.len()..]
                .chars()
                .next()
                .is_some_and(is_word_char),
            _ => false,
        }
    }

    fn peek_token(&self) -> String {
        let token: String = self
            .remaining()
            .chars()
            .take_while(|c| !c.is_whitespace())
            .collect();
        if token.is_empty() {
            "end of input".to_string()
        } else {
            token
        }
    }

    fn parse_number(&mut self) -> Result<f64, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut has_dot = false;
        let mut digits = 0;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits += 1;
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        if digits == 0 {
            self.pos = start;
            return Err(ParseError::new(
                format!("expected number, found '{}'", self.peek_token()),
                start,
            ));
        }

        let num_str = &self.input[start..self.pos];
        num_str
            .parse::<f64>()
            .map_err(|_| ParseError::new(format!("invalid number: {}", num_str), start))
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(ParseError::new(
                format!("unexpected input after number: '{}'", self.remaining()),
                self.pos,
            ));
        }
        Ok(())
    }
}

/// Split query text into trimmed, non-empty clauses.
pub fn split_clauses(input: &str) -> Vec<&str> {
    let mut cursor = Cursor::new(input);
    let mut clauses = Vec::new();
    let mut start = 0;

    while let Some(ch) = cursor.peek() {
        if ch == '\n' || ch == '\r' {
            clauses.push(&input[start..cursor.pos]);
            cursor.advance();
            start = cursor.pos;
        } else if cursor.peek_keyword("AND") {
            clauses.push(&input[start..cursor.pos]);
            cursor.pos += "AND".len();
            start = cursor.pos;
        } else {
            cursor.advance();
        }
    }
    clauses.push(&input[start..]);

    clauses
        .into_iter()
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .collect()
}

/// Parse one clause. Error positions are byte offsets into `clause`.
pub fn parse_clause(clause: &str) -> Result<Condition, ParseError> {
    // The number never contains an operator, so the last operator symbol is the operator.
    let (op_pos, operator) = clause
        .char_indices()
        .rev()
        .find_map(|(i, ch)| Operator::from_char(ch).map(|op| (i, op)))
        .ok_or_else(|| {
            ParseError::new(
                "expected operator ('>', '<' or '='), found end of input",
                clause.len(),
            )
        })?;

    let field_text = &clause[..op_pos];
    let field_name = field_text.trim();
    if field_name.is_empty() {
        return Err(ParseError::new("expected field name before operator", op_pos));
    }

    let mut cursor = Cursor::new(clause);
    cursor.pos = op_pos + operator.symbol().len_utf8();
    let value = cursor.parse_number()?;
    cursor.expect_end()?;

    let field = lookup_field(field_name).ok_or_else(|| {
        let field_start = field_text.len() - field_text.trim_start().len();
        ParseError::new(format!("unknown field '{}'", field_name), field_start)
    })?;

    Ok(Condition {
        field,
        operator,
        value,
    })
}

/// Parse a whole query, silently dropping clauses that do not parse.
pub fn parse_query(input: &str) -> Query {
    split_clauses(input)
        .into_iter()
        .filter_map(|clause| match parse_clause(clause) {
            Ok(condition) => Some(condition),
            Err(err) => {
                tracing::debug!(clause, error = %err, "dropping clause");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedClause {
    pub clause: String,
    pub error: ParseError,
}

/// Parse outcome with the reason each dropped clause was rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryReport {
    pub conditions: Query,
    pub rejected: Vec<RejectedClause>,
}

pub fn explain_query(input: &str) -> QueryReport {
    let mut report = QueryReport::default();
    for clause in split_clauses(input) {
        match parse_clause(clause) {
            Ok(condition) => report.conditions.push(condition),
            Err(error) => report.rejected.push(RejectedClause {
                clause: clause.to_string(),
                error,
            }),
        }
    }
    report
}
