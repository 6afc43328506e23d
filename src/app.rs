use log::{debug, info};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use snafu::{prelude::*, Snafu};

use faculty_polls::store::KeyValueStore;
use faculty_polls::{PollApp, PollError, Role};

use crate::args::{Args, Command};

#[derive(Debug, Snafu)]
pub enum CliError {
    #[snafu(display("{source}"))]
    App { source: PollError },
    #[snafu(display("Error accessing data directory {path}"))]
    DataDir { source: io::Error, path: String },
}

pub type CliResult<T> = Result<T, CliError>;

/// Durable key-value store: one JSON file per record key under a data
/// directory.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn open(root: &str) -> CliResult<DirStore> {
        fs::create_dir_all(root).context(DataDirSnafu {
            path: root.to_string(),
        })?;
        Ok(DirStore {
            root: Path::new(root).to_path_buf(),
        })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStore for DirStore {
    fn read_record(&self, key: &str) -> Result<Option<String>, PollError> {
        let path = self.record_path(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PollError::Store(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write_record(&mut self, key: &str, value: &str) -> Result<(), PollError> {
        let path = self.record_path(key);
        debug!("write_record: {} ({} bytes)", path.display(), value.len());
        fs::write(&path, value).map_err(|e| {
            PollError::Store(format!("cannot write {}: {}", path.display(), e))
        })
    }
}

/// Applies one user action to the stored state and prints the screen that
/// follows the action.
pub fn run(args: &Args) -> CliResult<()> {
    let store = DirStore::open(&args.data)?;
    let mut app = PollApp::load(store).context(AppSnafu)?;
    info!("data directory: {}", args.data);

    match &args.command {
        Command::Register {
            username,
            password,
            role,
            faculty,
        } => {
            let role: Role = role.parse().context(AppSnafu)?;
            app.register(username, password, role, faculty)
                .context(AppSnafu)?;
            println!("Registro exitoso. Inicia sesión.");
        }
        Command::Login { username, password } => {
            app.login(username, password).context(AppSnafu)?;
            println!("{}", app.render_current_screen());
        }
        Command::Logout => {
            app.logout().context(AppSnafu)?;
            println!("{}", app.render_current_screen());
        }
        Command::Show => {
            println!("{}", app.render_current_screen());
        }
        Command::CreatePoll {
            title,
            options,
            deadline,
        } => {
            app.create_poll(title, options, deadline).context(AppSnafu)?;
            println!("{}", app.render_current_screen());
        }
        Command::Vote { poll, option } => {
            app.submit_vote(*poll, option.as_deref()).context(AppSnafu)?;
            println!("Gracias por tu voto.");
            println!("{}", app.render_current_screen());
        }
    }
    Ok(())
}
