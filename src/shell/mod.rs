//! The interactive shell: one prompt over two contexts, a local working
//! directory and a remote base address, mutated by parallel command families.

mod command;
mod format;

pub use command::Command;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::AsyncBufReadExt;

use crate::local;
use crate::remote::client::RemoteClient;
use crate::remote::listing;
use crate::remote::url::RemoteBase;

/// The shell session: one remote client and one pair of current locations.
/// Lives for the whole process; single-threaded, one command at a time.
pub struct Shell<R: RemoteClient> {
    remote: R,
    base: RemoteBase,
    local_dir: PathBuf,
}

impl<R: RemoteClient> Shell<R> {
    pub fn new(remote: R) -> Result<Self> {
        let local_dir =
            std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self {
            remote,
            base: RemoteBase::default(),
            local_dir,
        })
    }

    /// Read-dispatch loop; returns on `exit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        println!("Interactive FTP client / local file manager");
        println!("{}", command::HELP);

        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("\n{}", self.prompt());
            std::io::stdout().flush().context("Failed to flush stdout")?;

            // End of input is treated exactly like `exit`
            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                break;
            };
            if !self.dispatch(Command::parse(&line)).await {
                break;
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        let local = self
            .local_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("local:{} | remote:{}> ", local, self.base.last_segment())
    }

    /// Execute one parsed command; `false` stops the loop. Every failure is
    /// printed here and leaves both path contexts as they were.
    async fn dispatch(&mut self, command: Command) -> bool {
        tracing::debug!(?command, "dispatching");
        let result = match command {
            Command::Empty => Ok(()),
            Command::Exit => return false,
            Command::Help => {
                println!("{}", command::HELP);
                Ok(())
            }
            Command::Usage(hint) => {
                println!("Usage: {}", hint);
                Ok(())
            }
            Command::Unknown(word) => {
                println!("Unknown command '{}'. Type 'help' for the command list.", word);
                Ok(())
            }
            Command::Connect { url, credentials } => self.connect(&url, credentials),
            Command::RemoteList => self.remote_list().await,
            Command::RemoteCd { name } => self.remote_cd(&name),
            Command::RemoteMkdir { name } => self.remote_mkdir(&name).await,
            Command::RemoteRemove { name, is_directory } => {
                self.remote_remove(&name, is_directory).await
            }
            Command::Download { remote, local } => self.download(&remote, &local).await,
            Command::Upload { local, remote } => self.upload(&local, &remote).await,
            Command::LocalList => self.local_list(),
            Command::LocalCd { path } => self.local_cd(&path),
            Command::LocalMkdir { path } => self.local_mkdir(&path),
            Command::LocalRemove { path } => self.local_remove(&path),
            Command::LocalMove { from, to } => self.local_move(&from, &to),
        };
        if let Err(err) = result {
            eprintln!("{:#}", err);
        }
        true
    }

    /// Remote operations need a base address; before the first `connect`
    /// there is none and the operation is refused instead of being sent to a
    /// degenerate address
    fn require_base(&self) -> Result<&RemoteBase> {
        if self.base.is_set() {
            Ok(&self.base)
        } else {
            Err(anyhow::anyhow!(
                "Not connected; use: connect <url> [user:password]"
            ))
        }
    }

    fn connect(&mut self, url: &str, credentials: Option<String>) -> Result<()> {
        self.base.set(url);
        self.remote.set_endpoint(self.base.as_str(), credentials);
        println!("Remote base set to {}", self.base.as_str());
        Ok(())
    }

    async fn remote_list(&self) -> Result<()> {
        let base = self.require_base()?;
        let raw = self.remote.list(base.as_str()).await?;
        let entries = listing::parse_listing(&raw);
        println!(
            "{}",
            format::render_listing(&format!("Remote directory {}", base.as_str()), &entries)
        );
        Ok(())
    }

    fn remote_cd(&mut self, name: &str) -> Result<()> {
        self.require_base()?;
        if name == ".." {
            self.base.ascend();
        } else {
            self.base.descend(name);
        }
        println!("Remote directory is now {}", self.base.as_str());
        Ok(())
    }

    async fn remote_mkdir(&self, name: &str) -> Result<()> {
        let base = self.require_base()?;
        self.remote.make_directory(&base.resolve(name)).await?;
        println!("Remote directory '{}' created", name);
        Ok(())
    }

    async fn remote_remove(&self, name: &str, is_directory: bool) -> Result<()> {
        let base = self.require_base()?;
        self.remote.remove(&base.resolve(name), is_directory).await?;
        let kind = if is_directory { "directory" } else { "file" };
        println!("Remote {} '{}' deleted", kind, name);
        Ok(())
    }

    async fn download(&self, remote: &str, local: &str) -> Result<()> {
        let base = self.require_base()?;
        let target = local::resolve(&self.local_dir, local);
        self.remote.download(&base.resolve(remote), &target).await?;
        println!("Downloaded '{}' to '{}'", remote, target.display());
        Ok(())
    }

    async fn upload(&self, local: &str, remote: &str) -> Result<()> {
        let base = self.require_base()?;
        let source = local::resolve(&self.local_dir, local);
        self.remote.upload(&source, &base.resolve(remote)).await?;
        println!("Uploaded '{}' as '{}'", local, remote);
        Ok(())
    }

    fn local_list(&self) -> Result<()> {
        let entries = local::list_directory(&self.local_dir)?;
        println!(
            "{}",
            format::render_listing(
                &format!("Local directory {}", self.local_dir.display()),
                &entries
            )
        );
        Ok(())
    }

    fn local_cd(&mut self, path: &str) -> Result<()> {
        // Commit only after the target has been verified to exist
        self.local_dir = local::change_directory(&self.local_dir, path)?;
        println!("Local directory changed to {}", self.local_dir.display());
        Ok(())
    }

    fn local_mkdir(&self, path: &str) -> Result<()> {
        let target = local::resolve(&self.local_dir, path);
        local::create_directory(&target)?;
        println!("Local directory '{}' created", path);
        Ok(())
    }

    fn local_remove(&self, path: &str) -> Result<()> {
        local::remove(&local::resolve(&self.local_dir, path))?;
        println!("'{}' deleted", path);
        Ok(())
    }

    fn local_move(&self, from: &str, to: &str) -> Result<()> {
        local::rename(
            &local::resolve(&self.local_dir, from),
            &local::resolve(&self.local_dir, to),
        )?;
        println!("Moved '{}' to '{}'", from, to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::client::MockRemoteClient;

    async fn feed(shell: &mut Shell<MockRemoteClient>, line: &str) -> bool {
        shell.dispatch(Command::parse(line)).await
    }

    fn new_shell() -> Shell<MockRemoteClient> {
        Shell::new(MockRemoteClient::default()).unwrap()
    }

    #[tokio::test]
    async fn listing_uses_the_descended_base_address() {
        let mut shell = new_shell();
        feed(&mut shell, "connect ftp://example.test/ anon:anon").await;
        feed(&mut shell, "cd sub").await;
        feed(&mut shell, "ls").await;

        let listed = shell.remote.listed.lock().unwrap();
        assert_eq!(*listed, vec!["ftp://example.test/sub/".to_string()]);
        let endpoints = shell.remote.endpoints.lock().unwrap();
        assert_eq!(
            *endpoints,
            vec![(
                "ftp://example.test/".to_string(),
                Some("anon:anon".to_string())
            )]
        );
    }

    #[tokio::test]
    async fn listing_survives_unstructured_server_output() {
        let mut shell = new_shell();
        shell.remote.set_listing("200 proudly served by ftpd\r\n");
        feed(&mut shell, "connect ftp://example.test/").await;
        assert!(feed(&mut shell, "ls").await);
        assert_eq!(shell.remote.listed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cd_dotdot_returns_to_the_parent() {
        let mut shell = new_shell();
        feed(&mut shell, "connect ftp://example.test/a").await;
        feed(&mut shell, "cd b").await;
        feed(&mut shell, "cd ..").await;
        assert_eq!(shell.base.as_str(), "ftp://example.test/a/");
    }

    #[tokio::test]
    async fn usage_errors_do_not_touch_the_base() {
        let mut shell = new_shell();
        feed(&mut shell, "connect ftp://example.test/").await;
        feed(&mut shell, "cd").await;
        feed(&mut shell, "cd one two").await;
        assert_eq!(shell.base.as_str(), "ftp://example.test/");
        assert!(shell.remote.listed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn remote_commands_are_refused_before_connect() {
        let mut shell = new_shell();
        feed(&mut shell, "ls").await;
        feed(&mut shell, "cd sub").await;
        feed(&mut shell, "mkdir sub").await;
        assert!(!shell.base.is_set());
        assert!(shell.remote.listed.lock().unwrap().is_empty());
        assert!(shell.remote.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_passes_the_caller_supplied_kind() {
        let mut shell = new_shell();
        feed(&mut shell, "connect ftp://example.test/").await;
        feed(&mut shell, "rm old 1").await;
        feed(&mut shell, "rm stale.txt 0").await;

        let removed = shell.remote.removed.lock().unwrap();
        assert_eq!(
            *removed,
            vec![
                ("ftp://example.test/old".to_string(), true),
                ("ftp://example.test/stale.txt".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn transfers_resolve_local_names_against_the_local_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = new_shell();
        shell.local_dir = dir.path().to_path_buf();
        feed(&mut shell, "connect ftp://example.test/").await;
        feed(&mut shell, "get report.pdf saved.pdf").await;

        {
            let downloads = shell.remote.downloads.lock().unwrap();
            assert_eq!(
                *downloads,
                vec![(
                    "ftp://example.test/report.pdf".to_string(),
                    dir.path().join("saved.pdf")
                )]
            );
        }

        feed(&mut shell, "put notes.txt remote-notes.txt").await;
        let uploads = shell.remote.uploads.lock().unwrap();
        assert_eq!(
            *uploads,
            vec![(
                dir.path().join("notes.txt"),
                "ftp://example.test/remote-notes.txt".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn failed_lcd_leaves_the_local_directory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = new_shell();
        shell.local_dir = dir.path().to_path_buf();
        feed(&mut shell, "lcd missing").await;
        assert_eq!(shell.local_dir, dir.path());
    }

    #[tokio::test]
    async fn exit_terminates_the_loop_and_nothing_else_does() {
        let mut shell = new_shell();
        assert!(feed(&mut shell, "").await);
        assert!(feed(&mut shell, "help").await);
        assert!(feed(&mut shell, "nonsense").await);
        assert!(!feed(&mut shell, "exit").await);
    }

    #[tokio::test]
    async fn prompt_shows_the_last_segment_of_both_contexts() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = new_shell();
        shell.local_dir = dir.path().join("work");
        feed(&mut shell, "connect ftp://example.test/pub").await;
        assert_eq!(shell.prompt(), "local:work | remote:pub> ");
    }
}
