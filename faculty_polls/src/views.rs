//! View rendering: stateless functions of (session user, collections) that
//! rebuild the visible screen content as plain text.

use crate::model::{Poll, User, VoteLedger};

/// The login screen, which also hosts registration.
pub fn login_view() -> String {
    let mut out = String::new();
    out.push_str("=== Inicio de sesión ===\n");
    out.push_str("Inicia sesión con 'login' o crea una cuenta con 'register'.\n");
    out
}

/// The professor screen: every poll of the professor's faculty with its
/// per-option tally in options order.
pub fn professor_view(user: &User, polls: &[Poll]) -> String {
    let mut out = format!("Profesor: {} | Facultad: {}\n", user.username, user.faculty);
    out.push_str("Encuestas:\n");
    for poll in polls.iter().filter(|p| p.faculty == user.faculty) {
        let tally: Vec<String> = poll
            .results
            .iter()
            .map(|(opt, count)| format!("{}: {} votos", opt, count))
            .collect();
        out.push_str(&format!(
            "- {} (hasta {})\n  {}\n",
            poll.title,
            poll.deadline,
            tally.join(", ")
        ));
    }
    out
}

/// The student screen: same-faculty polls split into pending and done,
/// keyed by the poll's position in the global collection.
pub fn student_view(user: &User, polls: &[Poll], votes: &VoteLedger) -> String {
    let no_votes: Vec<usize> = Vec::new();
    let voted = votes.get(&user.username).unwrap_or(&no_votes);

    let mut pending = String::new();
    let mut done = String::new();
    for (index, poll) in polls
        .iter()
        .enumerate()
        .filter(|(_, p)| p.faculty == user.faculty)
    {
        if voted.contains(&index) {
            done.push_str(&format!("- {} - Ya votaste\n", poll.title));
        } else {
            pending.push_str(&format!(
                "- [{}] {} (hasta {})\n",
                index, poll.title, poll.deadline
            ));
            for opt in poll.options.iter() {
                pending.push_str(&format!("    * {}\n", opt));
            }
        }
    }

    let mut out = format!(
        "Estudiante: {} | Facultad: {}\n",
        user.username, user.faculty
    );
    out.push_str("Pendientes:\n");
    out.push_str(&pending);
    out.push_str("Completadas:\n");
    out.push_str(&done);
    out
}
