//! Core of the faculty polling application.
//!
//! Professors create polls scoped to their faculty, students vote once per
//! poll, and results accumulate as per-option counts. All state lives in a
//! [PollApp] backed by a [store::KeyValueStore]: four records (`users`,
//! `polls`, `votes`, `currentUser`) are loaded once and written back after
//! every mutation. There is no concurrency; every operation runs to
//! completion before the next one starts.

mod model;
pub mod screen;
pub mod store;
pub mod validation;
pub mod views;

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use crate::model::*;
use crate::screen::Screen;
use crate::store::{KeyValueStore, CURRENT_USER_KEY, POLLS_KEY, USERS_KEY, VOTES_KEY};

// User notification messages.
const MSG_CREDENTIALS_REQUIRED: &str = "Usuario y contraseña son obligatorios";
const MSG_INVALID_USERNAME: &str =
    "Nombre de usuario inválido. Solo letras, números y guiones bajos.";
const MSG_INSECURE_PASSWORD: &str =
    "Contraseña insegura. Mínimo 6 caracteres, al menos una letra y un número.";
const MSG_FIELDS_REQUIRED: &str = "Completa todos los campos";
const MSG_MIN_OPTIONS: &str = "Debes ingresar al menos 2 opciones válidas separadas por coma";
const MSG_DEADLINE_IN_FUTURE: &str = "La fecha límite debe ser en el futuro";

/// The application state: the three domain collections, the current session
/// and the store they are mirrored into.
///
/// All mutation goes through the operations below; rendering code only sees
/// the read accessors.
pub struct PollApp<S: KeyValueStore> {
    store: S,
    users: Vec<User>,
    polls: Vec<Poll>,
    votes: VoteLedger,
    current_user: Option<User>,
}

fn read_record_or<S: KeyValueStore, T: DeserializeOwned>(
    store: &S,
    key: &str,
    default: T,
) -> Result<T, PollError> {
    match store.read_record(key)? {
        Some(text) => serde_json::from_str(&text)
            .map_err(|e| PollError::Store(format!("invalid record '{}': {}", key, e))),
        None => Ok(default),
    }
}

fn to_record<T: Serialize>(key: &str, value: &T) -> Result<String, PollError> {
    serde_json::to_string(value)
        .map_err(|e| PollError::Store(format!("cannot serialize record '{}': {}", key, e)))
}

impl<S: KeyValueStore> PollApp<S> {
    /// Loads the four records from the store. Records that were never
    /// written default to the empty collection or the absent session.
    pub fn load(store: S) -> Result<PollApp<S>, PollError> {
        let users: Vec<User> = read_record_or(&store, USERS_KEY, Vec::new())?;
        let polls: Vec<Poll> = read_record_or(&store, POLLS_KEY, Vec::new())?;
        let votes: VoteLedger = read_record_or(&store, VOTES_KEY, VoteLedger::new())?;
        let current_user: Option<User> = read_record_or(&store, CURRENT_USER_KEY, None)?;
        debug!(
            "load: {} users, {} polls, {} ledger entries, session: {:?}",
            users.len(),
            polls.len(),
            votes.len(),
            current_user.as_ref().map(|u| u.username.clone())
        );
        Ok(PollApp {
            store,
            users,
            polls,
            votes,
            current_user,
        })
    }

    // Writes all four records back. The program is single-threaded and
    // synchronous, so the sequence of writes is never observed partially.
    fn persist(&mut self) -> Result<(), PollError> {
        let users = to_record(USERS_KEY, &self.users)?;
        let polls = to_record(POLLS_KEY, &self.polls)?;
        let votes = to_record(VOTES_KEY, &self.votes)?;
        let current_user = to_record(CURRENT_USER_KEY, &self.current_user)?;
        self.store.write_record(USERS_KEY, &users)?;
        self.store.write_record(POLLS_KEY, &polls)?;
        self.store.write_record(VOTES_KEY, &votes)?;
        self.store.write_record(CURRENT_USER_KEY, &current_user)?;
        Ok(())
    }

    /// Creates a new account. The username must be unique (case-sensitive
    /// exact match) and both fields must pass validation.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
        faculty: &str,
    ) -> Result<(), PollError> {
        if validation::is_empty(username) || validation::is_empty(password) {
            return Err(PollError::Validation(MSG_CREDENTIALS_REQUIRED.to_string()));
        }
        if !validation::is_valid_username(username) {
            return Err(PollError::Validation(MSG_INVALID_USERNAME.to_string()));
        }
        if !validation::is_secure_password(password) {
            return Err(PollError::Validation(MSG_INSECURE_PASSWORD.to_string()));
        }
        if self.users.iter().any(|u| u.username == username) {
            return Err(PollError::DuplicateUser(username.to_string()));
        }
        self.users.push(User {
            username: username.to_string(),
            password: password.to_string(),
            role,
            faculty: faculty.to_string(),
        });
        self.persist()?;
        info!("register: new {:?} account '{}'", role, username);
        Ok(())
    }

    /// Opens a session for the account matching this exact username and
    /// password pair, and returns its role to drive navigation.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Role, PollError> {
        let user = self
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
            .ok_or(PollError::AuthenticationFailed)?;
        let role = user.role;
        self.current_user = Some(user);
        self.persist()?;
        info!("login: '{}' as {:?}", username, role);
        Ok(role)
    }

    /// Clears the session. Always succeeds, even with no session open.
    pub fn logout(&mut self) -> Result<(), PollError> {
        self.current_user = None;
        self.persist()?;
        info!("logout");
        Ok(())
    }

    /// Creates a poll for the session professor's faculty. `raw_options` is
    /// split on commas and each piece trimmed; all pieces are kept as
    /// options, but at least 2 of them must be non-empty. The deadline must
    /// be strictly after the current day.
    pub fn create_poll(
        &mut self,
        title: &str,
        raw_options: &str,
        deadline: &str,
    ) -> Result<(), PollError> {
        let faculty = match &self.current_user {
            Some(u) if u.role == Role::Professor => u.faculty.clone(),
            _ => return Err(PollError::RoleRequired(Role::Professor)),
        };
        if validation::is_empty(title) || validation::is_empty(deadline) {
            return Err(PollError::Validation(MSG_FIELDS_REQUIRED.to_string()));
        }
        let options: Vec<String> = raw_options.split(',').map(|s| s.trim().to_string()).collect();
        if !validation::has_minimum_options(&options) {
            return Err(PollError::Validation(MSG_MIN_OPTIONS.to_string()));
        }
        let deadline = validation::parse_future_date(deadline)
            .ok_or_else(|| PollError::Validation(MSG_DEADLINE_IN_FUTURE.to_string()))?;

        let poll = Poll::new(title.to_string(), options, deadline, faculty);
        info!(
            "create_poll: '{}' with {} options for faculty '{}'",
            poll.title,
            poll.options.len(),
            poll.faculty
        );
        self.polls.push(poll);
        self.persist()?;
        Ok(())
    }

    /// Records one vote from the session student on the poll at
    /// `poll_index` in the global collection.
    ///
    /// The ledger keeps the index at most once per user, but the tally is
    /// incremented on every call: only the student screen's pending/done
    /// split discourages voting twice, a repeated direct call still counts.
    /// No faculty or deadline check is applied either. See the README.
    pub fn submit_vote(
        &mut self,
        poll_index: usize,
        selected: Option<&str>,
    ) -> Result<(), PollError> {
        let username = match &self.current_user {
            Some(u) if u.role == Role::Student => u.username.clone(),
            _ => return Err(PollError::RoleRequired(Role::Student)),
        };
        let option = selected.ok_or(PollError::SelectionRequired)?;
        let poll = self
            .polls
            .get_mut(poll_index)
            .ok_or(PollError::UnknownPoll(poll_index))?;
        poll.record_vote(option)?;
        let entry = self.votes.entry(username.clone()).or_default();
        if !entry.contains(&poll_index) {
            entry.push(poll_index);
        }
        self.persist()?;
        info!(
            "submit_vote: '{}' voted '{}' on poll {}",
            username, option, poll_index
        );
        Ok(())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn polls(&self) -> &[Poll] {
        &self.polls
    }

    pub fn votes(&self) -> &VoteLedger {
        &self.votes
    }

    /// Renders the screen for the current session.
    pub fn render_current_screen(&self) -> String {
        match (
            Screen::for_session(self.current_user.as_ref()),
            &self.current_user,
        ) {
            (Screen::Professor, Some(user)) => views::professor_view(user, &self.polls),
            (Screen::Student, Some(user)) => views::student_view(user, &self.polls, &self.votes),
            _ => views::login_view(),
        }
    }

    /// Releases the underlying store, e.g. to reload from it.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, Local};

    fn tomorrow() -> String {
        (Local::now().date_naive() + Duration::days(1))
            .format("%Y-%m-%d")
            .to_string()
    }

    fn app() -> PollApp<MemoryStore> {
        let _ = env_logger::builder().is_test(true).try_init();
        PollApp::load(MemoryStore::new()).unwrap()
    }

    fn app_with_professor() -> PollApp<MemoryStore> {
        let mut app = app();
        app.register("profA", "Passw0rd", Role::Professor, "Eng")
            .unwrap();
        app.login("profA", "Passw0rd").unwrap();
        app
    }

    #[test]
    fn register_validates_inputs() {
        let mut app = app();
        let v = |msg: &str| Err(PollError::Validation(msg.to_string()));
        assert_eq!(
            app.register("  ", "Passw0rd", Role::Student, "Eng"),
            v(MSG_CREDENTIALS_REQUIRED)
        );
        assert_eq!(
            app.register("a b", "Passw0rd", Role::Student, "Eng"),
            v(MSG_INVALID_USERNAME)
        );
        assert_eq!(
            app.register("stuA", "abcdef", Role::Student, "Eng"),
            v(MSG_INSECURE_PASSWORD)
        );
        assert!(app.users().is_empty());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut app = app();
        app.register("profA", "Passw0rd", Role::Professor, "Eng")
            .unwrap();
        assert_eq!(
            app.register("profA", "0therPwd", Role::Student, "Law"),
            Err(PollError::DuplicateUser("profA".to_string()))
        );
        assert_eq!(
            app.users().iter().filter(|u| u.username == "profA").count(),
            1
        );
    }

    #[test]
    fn login_needs_the_exact_pair() {
        let mut app = app();
        app.register("profA", "Passw0rd", Role::Professor, "Eng")
            .unwrap();
        assert_eq!(
            app.login("profA", "wrong0ne"),
            Err(PollError::AuthenticationFailed)
        );
        assert_eq!(
            app.login("profB", "Passw0rd"),
            Err(PollError::AuthenticationFailed)
        );
        assert!(app.current_user().is_none());
        assert_eq!(app.login("profA", "Passw0rd"), Ok(Role::Professor));
        assert_eq!(app.current_user().unwrap().username, "profA");
    }

    #[test]
    fn logout_clears_the_session_and_always_succeeds() {
        let mut app = app_with_professor();
        app.logout().unwrap();
        assert!(app.current_user().is_none());
        app.logout().unwrap();
    }

    #[test]
    fn create_poll_requires_a_professor_session() {
        let mut app = app();
        assert_eq!(
            app.create_poll("Q1", "A,B", &tomorrow()),
            Err(PollError::RoleRequired(Role::Professor))
        );
        app.register("stuA", "Passw0rd", Role::Student, "Eng")
            .unwrap();
        app.login("stuA", "Passw0rd").unwrap();
        assert_eq!(
            app.create_poll("Q1", "A,B", &tomorrow()),
            Err(PollError::RoleRequired(Role::Professor))
        );
    }

    #[test]
    fn create_poll_validates_fields() {
        let mut app = app_with_professor();
        let v = |msg: &str| Err(PollError::Validation(msg.to_string()));
        assert_eq!(
            app.create_poll(" ", "A,B", &tomorrow()),
            v(MSG_FIELDS_REQUIRED)
        );
        assert_eq!(app.create_poll("Q1", "A,B", ""), v(MSG_FIELDS_REQUIRED));
        assert_eq!(
            app.create_poll("Q1", "A, ", &tomorrow()),
            v(MSG_MIN_OPTIONS)
        );
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(
            app.create_poll("Q1", "A,B", &today),
            v(MSG_DEADLINE_IN_FUTURE)
        );
        assert!(app.polls().is_empty());
    }

    #[test]
    fn create_poll_copies_faculty_and_collapses_duplicates() {
        let mut app = app_with_professor();
        app.create_poll("Best language", "Go, Rust, Go", &tomorrow())
            .unwrap();
        let poll = &app.polls()[0];
        assert_eq!(poll.faculty, "Eng");
        assert_eq!(poll.options, vec!["Go", "Rust", "Go"]);
        assert_eq!(poll.results.len(), 2);
        assert_eq!(poll.tally("Go"), Some(0));
        assert_eq!(poll.tally("Rust"), Some(0));
    }

    #[test]
    fn submit_vote_increments_and_records_the_ledger_once() {
        let mut app = app_with_professor();
        app.create_poll("Best language", "Go,Rust", &tomorrow())
            .unwrap();
        app.register("stuA", "Passw0rd", Role::Student, "Eng")
            .unwrap();
        app.login("stuA", "Passw0rd").unwrap();

        app.submit_vote(0, Some("Go")).unwrap();
        assert_eq!(app.polls()[0].tally("Go"), Some(1));
        assert_eq!(app.votes().get("stuA"), Some(&vec![0]));

        // A direct repeated call still increments the tally; the ledger
        // keeps a single entry for the poll.
        app.submit_vote(0, Some("Go")).unwrap();
        assert_eq!(app.polls()[0].tally("Go"), Some(2));
        assert_eq!(app.votes().get("stuA"), Some(&vec![0]));
    }

    #[test]
    fn submit_vote_failure_modes() {
        let mut app = app_with_professor();
        app.create_poll("Q1", "A,B", &tomorrow()).unwrap();
        assert_eq!(
            app.submit_vote(0, Some("A")),
            Err(PollError::RoleRequired(Role::Student))
        );

        app.register("stuA", "Passw0rd", Role::Student, "Eng")
            .unwrap();
        app.login("stuA", "Passw0rd").unwrap();
        assert_eq!(app.submit_vote(0, None), Err(PollError::SelectionRequired));
        assert_eq!(
            app.submit_vote(7, Some("A")),
            Err(PollError::UnknownPoll(7))
        );
        assert_eq!(
            app.submit_vote(0, Some("C")),
            Err(PollError::UnknownOption("C".to_string()))
        );
        assert_eq!(app.polls()[0].tally("A"), Some(0));
        assert!(app.votes().get("stuA").is_none());
    }

    #[test]
    fn state_survives_a_reload_from_the_same_store() {
        let mut app = app_with_professor();
        app.create_poll("Q1", "A,B", &tomorrow()).unwrap();
        let store = app.into_store();

        let app = PollApp::load(store).unwrap();
        assert_eq!(app.users().len(), 1);
        assert_eq!(app.polls().len(), 1);
        // The session is one of the persisted records.
        assert_eq!(app.current_user().unwrap().username, "profA");
    }

    #[test]
    fn end_to_end_register_vote_and_render() {
        let mut app = app();
        app.register("profA", "Passw0rd", Role::Professor, "Eng")
            .unwrap();
        assert_eq!(app.login("profA", "Passw0rd"), Ok(Role::Professor));
        app.create_poll("Q1", "A,B", &tomorrow()).unwrap();

        app.register("stuA", "Passw0rd", Role::Student, "Eng")
            .unwrap();
        assert_eq!(app.login("stuA", "Passw0rd"), Ok(Role::Student));
        app.submit_vote(0, Some("A")).unwrap();

        app.login("profA", "Passw0rd").unwrap();
        let rendered = app.render_current_screen();
        assert!(rendered.contains("A: 1 votos, B: 0 votos"), "{}", rendered);
    }

    #[test]
    fn render_follows_the_screen_controller() {
        let mut app = app();
        assert!(app.render_current_screen().contains("Inicio de sesión"));
        app.register("stuA", "Passw0rd", Role::Student, "Eng")
            .unwrap();
        app.login("stuA", "Passw0rd").unwrap();
        assert!(app.render_current_screen().contains("Estudiante: stuA"));
        app.logout().unwrap();
        assert!(app.render_current_screen().contains("Inicio de sesión"));
    }
}
