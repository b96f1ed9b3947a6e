//! Shell core functionality
//!
//! The interactive read-eval-print loop over the namespace engine. Reads
//! one line at a time, dispatches the parsed command, prints the result,
//! and repeats until `exit` or end of input.

use log::info;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::commands::{handle_command, parse_command, CommandStatus};
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::session::Session;
use crate::store::NamespaceStore;

pub struct Shell {
    session: Session,
    store: NamespaceStore,
    config: ShellConfig,
}

impl Shell {
    /// Loads the namespace and opens a superuser session rooted at `/`.
    pub fn new(config: ShellConfig) -> Self {
        let store = NamespaceStore::load(&config);
        let session = Session::new(store.superuser());
        Self {
            session,
            store,
            config,
        }
    }

    fn prompt(&self) -> String {
        format!(
            "{}@{} {} # ",
            self.session.current_user(),
            self.store.hostname(),
            self.session.current_virtual_path()
        )
    }

    /// Runs the interactive loop until `exit` or end of input.
    ///
    /// One command runs to completion before the next line is read; the
    /// engine itself never suspends.
    pub async fn run(&mut self) -> Result<(), ShellError> {
        let mut reader = BufReader::new(tokio::io::stdin());
        let mut writer = tokio::io::stdout();
        let mut line = String::new();

        loop {
            writer.write_all(self.prompt().as_bytes()).await?;
            writer.flush().await?;

            line.clear();
            let n = reader.read_line(&mut line).await?;
            if n == 0 {
                info!("End of input; closing session");
                break;
            }

            if line.len() > self.config.max_command_length {
                writer.write_all(b"Command too long.\n").await?;
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let command = parse_command(trimmed);
            info!("Executing {:?}", command);

            let result = handle_command(&mut self.session, &mut self.store, &command, &self.config);

            match result.status {
                CommandStatus::CloseSession => {
                    if let Some(msg) = result.message {
                        writer.write_all(msg.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                    }
                    info!("Session closed");
                    break;
                }
                CommandStatus::Success | CommandStatus::Failure(_) => {
                    if let Some(msg) = result.message {
                        writer.write_all(msg.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                    }
                    writer.flush().await?;
                }
            }
        }

        Ok(())
    }
}
