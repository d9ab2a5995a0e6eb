use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;

/// Contract of the transfer side. Addresses are full URLs built by the shell
/// from the current remote base; `list` hands back the raw multi-line LIST
/// text and leaves parsing to the caller.
#[async_trait]
pub trait RemoteClient {
    fn set_endpoint(&mut self, base_address: &str, credentials: Option<String>);
    async fn list(&self, base_address: &str) -> Result<String>;
    async fn download(&self, remote_address: &str, local_path: &Path) -> Result<()>;
    async fn upload(&self, local_path: &Path, remote_address: &str) -> Result<()>;
    async fn make_directory(&self, address: &str) -> Result<()>;
    async fn remove(&self, address: &str, is_directory: bool) -> Result<()>;
}

/// Production client: one `curl` invocation per command, credentials passed
/// with `--user`, non-zero exits surfaced with curl's own stderr message.
pub struct CurlClient {
    credentials: Option<String>,
}

impl CurlClient {
    /// Probe for the `curl` binary; the shell cannot run without it
    pub async fn new() -> Result<Self> {
        let status = Command::new("curl")
            .arg("--version")
            .stdout(std::process::Stdio::null())
            .status()
            .await
            .context("curl binary not found on PATH")?;
        if !status.success() {
            anyhow::bail!("curl --version exited with {}", status);
        }
        Ok(Self { credentials: None })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("curl");
        cmd.arg("--silent").arg("--show-error");
        if let Some(userpass) = &self.credentials {
            cmd.arg("--user").arg(userpass);
        }
        cmd
    }

    async fn run(mut cmd: Command) -> Result<Vec<u8>> {
        let output = cmd.output().await.context("Failed to execute curl")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("curl failed: {}", stderr.trim());
        }
        Ok(output.stdout)
    }

    /// Split a full address into its parent listing URL and leaf name; the
    /// directory create/delete verbs are QUOTE commands that act on an entry
    /// of the parent directory
    fn split_leaf(address: &str) -> (String, String) {
        let trimmed = address.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(pos) => (trimmed[..=pos].to_string(), trimmed[pos + 1..].to_string()),
            None => (String::new(), trimmed.to_string()),
        }
    }
}

#[async_trait]
impl RemoteClient for CurlClient {
    fn set_endpoint(&mut self, base_address: &str, credentials: Option<String>) {
        if credentials.is_some() {
            self.credentials = credentials;
        }
        tracing::debug!(base = base_address, "remote endpoint set");
    }

    async fn list(&self, base_address: &str) -> Result<String> {
        let mut cmd = self.command();
        cmd.arg(base_address);
        let stdout = Self::run(cmd).await.context("Directory listing failed")?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    async fn download(&self, remote_address: &str, local_path: &Path) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("--output").arg(local_path).arg(remote_address);
        Self::run(cmd).await.context("Download failed")?;
        Ok(())
    }

    async fn upload(&self, local_path: &Path, remote_address: &str) -> Result<()> {
        if !local_path.is_file() {
            anyhow::bail!("Could not open local file '{}'", local_path.display());
        }
        let mut cmd = self.command();
        cmd.arg("--upload-file").arg(local_path).arg(remote_address);
        Self::run(cmd).await.context("Upload failed")?;
        Ok(())
    }

    async fn make_directory(&self, address: &str) -> Result<()> {
        let (parent, name) = Self::split_leaf(address);
        let mut cmd = self.command();
        cmd.arg("--quote").arg(format!("MKD {}", name)).arg(&parent);
        Self::run(cmd).await.context("Remote mkdir failed")?;
        Ok(())
    }

    async fn remove(&self, address: &str, is_directory: bool) -> Result<()> {
        let verb = if is_directory { "RMD" } else { "DELE" };
        let (parent, name) = Self::split_leaf(address);
        let mut cmd = self.command();
        cmd.arg("--quote")
            .arg(format!("{} {}", verb, name))
            .arg(&parent);
        Self::run(cmd).await.context("Remote delete failed")?;
        Ok(())
    }
}

/// Records every call so shell tests can assert on the exact addresses the
/// router produced
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MockRemoteClient {
    pub endpoints: std::sync::Mutex<Vec<(String, Option<String>)>>,
    pub listed: std::sync::Mutex<Vec<String>>,
    pub downloads: std::sync::Mutex<Vec<(String, std::path::PathBuf)>>,
    pub uploads: std::sync::Mutex<Vec<(std::path::PathBuf, String)>>,
    pub created: std::sync::Mutex<Vec<String>>,
    pub removed: std::sync::Mutex<Vec<(String, bool)>>,
    pub listing: std::sync::Mutex<String>,
}

#[cfg(test)]
impl MockRemoteClient {
    pub(crate) fn set_listing(&self, raw: &str) {
        *self.listing.lock().unwrap() = raw.to_string();
    }
}

#[cfg(test)]
#[async_trait]
impl RemoteClient for MockRemoteClient {
    fn set_endpoint(&mut self, base_address: &str, credentials: Option<String>) {
        self.endpoints
            .lock()
            .unwrap()
            .push((base_address.to_string(), credentials));
    }

    async fn list(&self, base_address: &str) -> Result<String> {
        self.listed.lock().unwrap().push(base_address.to_string());
        Ok(self.listing.lock().unwrap().clone())
    }

    async fn download(&self, remote_address: &str, local_path: &Path) -> Result<()> {
        self.downloads
            .lock()
            .unwrap()
            .push((remote_address.to_string(), local_path.to_path_buf()));
        Ok(())
    }

    async fn upload(&self, local_path: &Path, remote_address: &str) -> Result<()> {
        self.uploads
            .lock()
            .unwrap()
            .push((local_path.to_path_buf(), remote_address.to_string()));
        Ok(())
    }

    async fn make_directory(&self, address: &str) -> Result<()> {
        self.created.lock().unwrap().push(address.to_string());
        Ok(())
    }

    async fn remove(&self, address: &str, is_directory: bool) -> Result<()> {
        self.removed
            .lock()
            .unwrap()
            .push((address.to_string(), is_directory));
        Ok(())
    }
}
