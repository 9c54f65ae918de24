//! System context discovery
//!
//! Gathers the environment facts embedded in every prompt. Discovery never
//! fails; any field that cannot be determined degrades to "unknown".

use tokio::process::Command;

/// Snapshot of the environment the user is working in
#[derive(Debug, Clone)]
pub struct SystemContext {
    /// Current working directory
    pub cwd: String,
    /// Login shell
    pub shell: String,
    /// OS description (`uname -a`)
    pub os: String,
    /// Current user
    pub user: String,
}

impl SystemContext {
    /// Discover the current system context
    pub async fn discover() -> Self {
        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let shell = std::env::var("SHELL").unwrap_or_else(|_| "unknown".to_string());
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());

        let os = match Command::new("uname").arg("-a").output().await {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            _ => "unknown".to_string(),
        };

        Self {
            cwd,
            shell,
            os,
            user,
        }
    }
}
