//! Parsing of data statements.

use crate::error::PrepareError;
use crate::row::Row;
use crate::{EMAIL_SIZE, USERNAME_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `insert <id> <username> <email>`
    Insert(Row),
    /// `select`, a full scan in insertion order.
    Select,
}

impl Statement {
    /// Parses one input line, without its line terminator.
    ///
    /// Keywords are case-sensitive. `insert` must be followed by whitespace;
    /// a line such as `insertx 1 a b` is not an insert. Fields after the
    /// email are ignored.
    pub fn prepare(input: &str) -> Result<Statement, PrepareError> {
        if input == "select" {
            return Ok(Statement::Select);
        }

        let mut tokens = input.split_whitespace();
        match tokens.next() {
            Some("insert") if input.starts_with("insert") => prepare_insert(input, tokens),
            _ => Err(PrepareError::Unrecognized(input.to_string())),
        }
    }
}

fn prepare_insert<'a>(
    input: &str,
    mut args: impl Iterator<Item = &'a str>,
) -> Result<Statement, PrepareError> {
    let syntax_error = || PrepareError::Syntax(input.to_string());

    let (Some(id), Some(username), Some(email)) = (args.next(), args.next(), args.next()) else {
        return Err(syntax_error());
    };

    let id = match id.parse::<u32>() {
        Ok(id) => id,
        Err(_) if id.parse::<i64>().is_ok_and(|id| id < 0) => {
            return Err(PrepareError::NegativeId);
        }
        Err(_) => return Err(syntax_error()),
    };

    // Stored text is zero terminated.
    if username.contains('\0') || email.contains('\0') {
        return Err(syntax_error());
    }
    if username.len() > USERNAME_SIZE || email.len() > EMAIL_SIZE {
        return Err(PrepareError::StringTooLong);
    }

    Ok(Statement::Insert(Row::new(id, username, email)))
}
