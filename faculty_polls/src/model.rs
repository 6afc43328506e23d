// ********* Domain data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two kinds of accounts.
///
/// Professors create polls for their faculty, students vote on them.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Professor,
    Student,
}

impl FromStr for Role {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Role, PollError> {
        // The Spanish spellings are also accepted.
        match s.trim() {
            "professor" | "profesor" => Ok(Role::Professor),
            "student" | "estudiante" => Ok(Role::Student),
            other => Err(PollError::Validation(format!(
                "Rol desconocido: '{}'. Usa 'professor' o 'student'.",
                other
            ))),
        }
    }
}

/// A registered account. Immutable once created.
///
/// The password is stored and compared in plain text. A known weakness of
/// this application, see the README.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub faculty: String,
}

/// A poll created by a professor for their faculty.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub title: String,
    /// Every comma-separated piece of the creation input, trimmed, in order.
    /// Duplicates and empty pieces are kept.
    pub options: Vec<String>,
    pub deadline: NaiveDate,
    pub faculty: String,
    /// Insertion-ordered tally: one entry per distinct option string, in
    /// options order. Duplicated options collapse onto a single entry.
    pub results: Vec<(String, u64)>,
}

impl Poll {
    pub fn new(title: String, options: Vec<String>, deadline: NaiveDate, faculty: String) -> Poll {
        let mut results: Vec<(String, u64)> = Vec::new();
        for opt in options.iter() {
            if !results.iter().any(|(name, _)| name == opt) {
                results.push((opt.clone(), 0));
            }
        }
        Poll {
            title,
            options,
            deadline,
            faculty,
            results,
        }
    }

    /// The current count for an option, if the option exists in this poll.
    pub fn tally(&self, option: &str) -> Option<u64> {
        self.results
            .iter()
            .find(|(name, _)| name == option)
            .map(|(_, count)| *count)
    }

    pub(crate) fn record_vote(&mut self, option: &str) -> Result<(), PollError> {
        match self.results.iter_mut().find(|(name, _)| name == option) {
            Some((_, count)) => {
                *count += 1;
                Ok(())
            }
            None => Err(PollError::UnknownOption(option.to_string())),
        }
    }
}

/// Which polls every user has already voted on, by position in the global
/// poll collection. Entries are appended by [submit_vote](crate::PollApp::submit_vote)
/// and never removed.
pub type VoteLedger = HashMap<String, Vec<usize>>;

/// Everything that can go wrong while operating on the application state.
///
/// Every variant except `Store` is a user-input or lookup failure: the user
/// can correct the input and retry. The display messages are the notification
/// strings shown to the user.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum PollError {
    /// A field is missing or malformed. Carries the user-facing message.
    Validation(String),
    /// An account with this username already exists.
    DuplicateUser(String),
    /// No account matches this username and password pair.
    AuthenticationFailed,
    /// A vote was submitted without choosing an option.
    SelectionRequired,
    /// The operation needs a logged-in user with this role.
    RoleRequired(Role),
    /// No poll at this position in the global collection.
    UnknownPoll(usize),
    /// The chosen option is not part of the poll.
    UnknownOption(String),
    /// The store adapter failed to read or write a record.
    Store(String),
}

impl Error for PollError {}

impl Display for PollError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollError::Validation(msg) => write!(f, "{}", msg),
            PollError::DuplicateUser(_) => write!(f, "El usuario ya existe"),
            PollError::AuthenticationFailed => write!(f, "Credenciales incorrectas"),
            PollError::SelectionRequired => write!(f, "Selecciona una opción"),
            PollError::RoleRequired(Role::Professor) => {
                write!(f, "Solo un profesor puede realizar esta acción")
            }
            PollError::RoleRequired(Role::Student) => {
                write!(f, "Solo un estudiante puede realizar esta acción")
            }
            PollError::UnknownPoll(index) => write!(f, "No existe la encuesta {}", index),
            PollError::UnknownOption(option) => {
                write!(f, "La opción '{}' no existe en esta encuesta", option)
            }
            PollError::Store(msg) => write!(f, "Error de almacenamiento: {}", msg),
        }
    }
}
