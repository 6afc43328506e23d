//! Screen controller: exactly one named screen is visible at a time.

use crate::model::{Role, User};

/// The screens of the application. Registration happens on the login screen.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Screen {
    Login,
    Professor,
    Student,
}

impl Screen {
    /// The screen to show for a session: the role-specific view when a user
    /// is logged in, the login screen otherwise. This single rule covers
    /// application start, successful login, logout and registration.
    pub fn for_session(session: Option<&User>) -> Screen {
        match session {
            None => Screen::Login,
            Some(user) => match user.role {
                Role::Professor => Screen::Professor,
                Role::Student => Screen::Student,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_follow_the_session() {
        assert_eq!(Screen::for_session(None), Screen::Login);
        let mut user = User {
            username: "profA".to_string(),
            password: "Passw0rd".to_string(),
            role: Role::Professor,
            faculty: "Eng".to_string(),
        };
        assert_eq!(Screen::for_session(Some(&user)), Screen::Professor);
        user.role = Role::Student;
        assert_eq!(Screen::for_session(Some(&user)), Screen::Student);
    }
}
