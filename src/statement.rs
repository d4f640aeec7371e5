use thiserror::Error;

use crate::row::Row;
use crate::{EMAIL_SIZE, USERNAME_SIZE};

// Non-SQL statements like .exit are called “meta-commands”.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Constants,
    Unrecognized,
}

impl MetaCommand {
    fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            ".constants" => Some(MetaCommand::Constants),
            _ if input.starts_with('.') => Some(MetaCommand::Unrecognized),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    #[error("ID must be positive.")]
    NegativeId,

    #[error("String is too long.")]
    StringTooLong,

    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("Unrecognized command: {0}")]
    Unrecognized(String),
}

impl Statement {
    pub fn prepare(input: &str) -> Result<Statement, PrepareError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        match tokens.as_slice() {
            ["insert", id, username, email] => prepare_insert(id, username, email),
            ["insert", ..] => Err(PrepareError::SyntaxError),
            ["select"] => Ok(Statement::Select),
            ["select", ..] => Err(PrepareError::SyntaxError),
            _ => Err(PrepareError::Unrecognized(input.to_string())),
        }
    }
}

fn prepare_insert(id: &str, username: &str, email: &str) -> Result<Statement, PrepareError> {
    let id: i64 = id.parse().map_err(|_| PrepareError::SyntaxError)?;
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| PrepareError::SyntaxError)?;

    if username.len() > USERNAME_SIZE || email.len() > EMAIL_SIZE {
        return Err(PrepareError::StringTooLong);
    }
    // A NUL would end the string early once it is read back from its slot.
    if username.contains('\0') || email.contains('\0') {
        return Err(PrepareError::SyntaxError);
    }

    Ok(Statement::Insert(Row::new(id, username, email)))
}

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Meta(MetaCommand),
    Statement(Result<Statement, PrepareError>),
}

impl Input {
    pub fn parse(input: &str) -> Input {
        if let Some(meta) = MetaCommand::parse(input) {
            Input::Meta(meta)
        } else {
            Input::Statement(Statement::prepare(input))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_insert() {
        assert_eq!(
            Statement::prepare("insert 1 user1 person1@example.com"),
            Ok(Statement::Insert(Row::new(1, "user1", "person1@example.com")))
        );
        assert_eq!(
            Statement::prepare("  insert   0 a   b "),
            Ok(Statement::Insert(Row::new(0, "a", "b")))
        );
    }

    #[test]
    fn parses_select() {
        assert_eq!(Statement::prepare("select"), Ok(Statement::Select));
        assert_eq!(Statement::prepare("select *"), Err(PrepareError::SyntaxError));
    }

    #[test]
    fn rejects_negative_id() {
        assert_eq!(
            Statement::prepare("insert -1 user1 person1@example.com"),
            Err(PrepareError::NegativeId)
        );
    }

    #[test]
    fn rejects_malformed_insert() {
        for input in [
            "insert",
            "insert 1 user1",
            "insert 1 user1 a@b extra",
            "insert one user1 a@b",
            "insert 4294967296 user1 a@b",
        ] {
            assert_eq!(Statement::prepare(input), Err(PrepareError::SyntaxError), "{input}");
        }
        assert!(Statement::prepare("insert 4294967295 user1 a@b").is_ok());
    }

    #[test]
    fn rejects_nul_inside_strings() {
        assert_eq!(Statement::prepare("insert 1 us\0er a@b"), Err(PrepareError::SyntaxError));
        assert_eq!(Statement::prepare("insert 1 user a\0@b"), Err(PrepareError::SyntaxError));
    }

    #[test]
    fn string_length_limits_are_inclusive() {
        let username = "a".repeat(USERNAME_SIZE);
        let email = "a".repeat(EMAIL_SIZE);
        assert!(Statement::prepare(&format!("insert 1 {username} {email}")).is_ok());

        assert_eq!(
            Statement::prepare(&format!("insert 1 {username}a {email}")),
            Err(PrepareError::StringTooLong)
        );
        assert_eq!(
            Statement::prepare(&format!("insert 1 {username} {email}a")),
            Err(PrepareError::StringTooLong)
        );
    }

    #[test]
    fn classifies_meta_commands() {
        assert_eq!(Input::parse(".exit"), Input::Meta(MetaCommand::Exit));
        assert_eq!(Input::parse(".constants"), Input::Meta(MetaCommand::Constants));
        assert_eq!(Input::parse(".btree"), Input::Meta(MetaCommand::Unrecognized));
        assert_eq!(
            Input::parse("update 1"),
            Input::Statement(Err(PrepareError::Unrecognized("update 1".to_string())))
        );
    }

    #[test]
    fn error_messages_match_prompt_output() {
        assert_eq!(PrepareError::NegativeId.to_string(), "ID must be positive.");
        assert_eq!(PrepareError::StringTooLong.to_string(), "String is too long.");
        assert_eq!(
            PrepareError::Unrecognized("foo".into()).to_string(),
            "Unrecognized command: foo"
        );
    }
}
