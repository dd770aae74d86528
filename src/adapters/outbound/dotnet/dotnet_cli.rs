use crate::ports::outbound::PackageManagerGateway;
use crate::shared::error::OverriderError;
use crate::shared::Result;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Default executable name, resolved through PATH
pub const DEFAULT_PROGRAM: &str = "dotnet";

/// Default upper bound for a single dotnet invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Lines of tool output kept in failure details
const MAX_DETAIL_LINES: usize = 5;

/// DotnetCli adapter implementing PackageManagerGateway with the `dotnet` CLI
///
/// Each call spawns one `dotnet` process and waits for it, bounded by the
/// configured timeout. A process that outlives the timeout is killed.
#[derive(Debug, Clone)]
pub struct DotnetCli {
    program: PathBuf,
    timeout: Duration,
    working_dir: Option<PathBuf>,
}

impl DotnetCli {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            timeout: DEFAULT_TIMEOUT,
            working_dir: None,
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs every invocation from `dir` instead of the current directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn command_line(&self, args: &[OsString]) -> String {
        let mut line = self.program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Spawns the program and collects its output
    ///
    /// Spawn failures are returned as `std::io::Error` so that `probe` can
    /// tell a missing executable apart from a failing one.
    async fn run(&self, args: Vec<OsString>) -> std::result::Result<Output, RunError> {
        let command_line = self.command_line(&args);
        debug!(command = %command_line, "running package manager");

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let started = Instant::now();
        let child = command.spawn().map_err(RunError::Spawn)?;
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                RunError::Failed(OverriderError::CommandFailed {
                    command: command_line.clone(),
                    details: e.to_string(),
                })
            })?,
            Err(_) => {
                debug!(command = %command_line, "package manager timed out");
                return Err(RunError::Failed(OverriderError::CommandTimedOut {
                    command: command_line,
                    timeout: self.timeout,
                }));
            }
        };

        debug!(
            command = %command_line,
            status = %output.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "package manager finished"
        );
        Ok(output)
    }

    /// Runs the program and fails on spawn errors or a non-zero exit status
    async fn run_checked(&self, args: Vec<OsString>) -> Result<Output> {
        let command_line = self.command_line(&args);
        let output = self.run(args).await.map_err(|e| e.into_error(&command_line))?;

        if !output.status.success() {
            return Err(OverriderError::CommandFailed {
                command: command_line,
                details: failure_details(&output),
            }
            .into());
        }
        Ok(output)
    }
}

impl Default for DotnetCli {
    fn default() -> Self {
        Self::new()
    }
}

enum RunError {
    Spawn(std::io::Error),
    Failed(OverriderError),
}

impl RunError {
    fn into_error(self, command_line: &str) -> anyhow::Error {
        match self {
            RunError::Spawn(e) => OverriderError::CommandFailed {
                command: command_line.to_string(),
                details: format!("failed to start: {}", e),
            }
            .into(),
            RunError::Failed(e) => e.into(),
        }
    }
}

/// Summarises a failed invocation: exit status plus the tail of its output
///
/// dotnet writes most errors to stdout, so stdout is used when stderr is empty.
fn failure_details(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = if stderr.trim().is_empty() {
        stdout
    } else {
        stderr
    };

    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let tail = &lines[lines.len().saturating_sub(MAX_DETAIL_LINES)..];
    if tail.is_empty() {
        format!("exited with {}", output.status)
    } else {
        format!("exited with {}: {}", output.status, tail.join("\n"))
    }
}

#[async_trait]
impl PackageManagerGateway for DotnetCli {
    async fn probe(&self) -> Result<()> {
        match self.run(vec!["--version".into()]).await {
            Ok(_) => Ok(()),
            Err(RunError::Spawn(e)) => Err(OverriderError::ToolMissing {
                program: self.program.display().to_string(),
                details: e.to_string(),
            }
            .into()),
            Err(RunError::Failed(e)) => Err(e.into()),
        }
    }

    async fn refresh(&self, project_path: &Path) -> Result<()> {
        self.run_checked(vec!["restore".into(), project_path.into()])
            .await?;
        Ok(())
    }

    async fn report(&self, project_path: &Path) -> Result<String> {
        let args: Vec<OsString> = vec![
            "list".into(),
            project_path.into(),
            "package".into(),
            "--include-transitive".into(),
            "--format".into(),
            "json".into(),
        ];
        let command_line = self.command_line(&args);
        let output = self
            .run(args)
            .await
            .map_err(|e| e.into_error(&command_line))?;

        // A failing list still prints a JSON report with a `problems` array.
        if !output.status.success() && output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(OverriderError::CommandFailed {
                command: command_line,
                details: failure_details(&output),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn set_direct(&self, project_path: &str, package_id: &str, version: &str) -> Result<()> {
        self.run_checked(vec![
            "add".into(),
            project_path.into(),
            "package".into(),
            package_id.into(),
            "-v".into(),
            version.into(),
        ])
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let cli = DotnetCli::new();
        let args: Vec<OsString> = vec!["restore".into(), "/src/App.csproj".into()];
        assert_eq!(cli.command_line(&args), "dotnet restore /src/App.csproj");
    }

    #[tokio::test]
    async fn test_probe_missing_program() {
        let cli = DotnetCli::new().with_program("/nonexistent/bin/dotnet");
        let err = cli.probe().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OverriderError>(),
            Some(OverriderError::ToolMissing { .. })
        ));
    }

    #[tokio::test]
    async fn test_refresh_missing_program_is_command_failure() {
        let cli = DotnetCli::new().with_program("/nonexistent/bin/dotnet");
        let err = cli.refresh(Path::new("App.csproj")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OverriderError>(),
            Some(OverriderError::CommandFailed { .. })
        ));
    }

    /// Runs `sh <verb> ...`: sh executes the script file named after the
    /// dotnet verb from the working directory, with the remaining arguments
    /// as `$1`, `$2`, ...
    #[cfg(unix)]
    mod with_fake_dotnet {
        use super::*;
        use std::fs;
        use tempfile::TempDir;

        fn fake_dotnet(scripts: &[(&str, &str)]) -> (TempDir, DotnetCli) {
            let dir = TempDir::new().unwrap();
            for (verb, body) in scripts {
                fs::write(dir.path().join(verb), body).unwrap();
            }
            let cli = DotnetCli::new()
                .with_program("sh")
                .with_working_dir(dir.path());
            (dir, cli)
        }

        #[tokio::test]
        async fn test_report_returns_stdout() {
            let (_dir, cli) = fake_dotnet(&[("list", "echo '{\"projects\": []}'\n")]);
            let json = cli.report(Path::new("App.csproj")).await.unwrap();
            assert_eq!(json.trim(), "{\"projects\": []}");
        }

        #[tokio::test]
        async fn test_report_keeps_output_of_failing_list() {
            let (_dir, cli) = fake_dotnet(&[(
                "list",
                "echo '{\"problems\": [{\"text\": \"boom\"}]}'\nexit 1\n",
            )]);
            let json = cli.report(Path::new("App.csproj")).await.unwrap();
            assert!(json.contains("boom"));
        }

        #[tokio::test]
        async fn test_report_without_output_fails() {
            let (_dir, cli) = fake_dotnet(&[("list", "echo 'MSB1009: missing' >&2\nexit 1\n")]);
            let err = cli.report(Path::new("App.csproj")).await.unwrap_err();
            assert!(err.to_string().contains("MSB1009"));
        }

        #[tokio::test]
        async fn test_set_direct_passes_arguments() {
            let (dir, cli) = fake_dotnet(&[("add", "echo \"$@\" > added.log\n")]);
            cli.set_direct("App.csproj", "Newtonsoft.Json", "13.0.3")
                .await
                .unwrap();

            let logged = fs::read_to_string(dir.path().join("added.log")).unwrap();
            assert_eq!(logged.trim(), "App.csproj package Newtonsoft.Json -v 13.0.3");
        }

        #[tokio::test]
        async fn test_non_zero_exit_is_failure() {
            let (_dir, cli) = fake_dotnet(&[("restore", "echo 'error NU1101: nope'\nexit 1\n")]);
            let err = cli.refresh(Path::new("App.csproj")).await.unwrap_err();

            match err.downcast_ref::<OverriderError>() {
                Some(OverriderError::CommandFailed { command, details }) => {
                    assert_eq!(command, "sh restore App.csproj");
                    assert!(details.contains("NU1101"));
                }
                other => panic!("expected CommandFailed, got {:?}", other),
            }
        }

        #[tokio::test]
        async fn test_timeout() {
            let (_dir, cli) = fake_dotnet(&[("restore", "sleep 5\n")]);
            let cli = cli.with_timeout(Duration::from_millis(200));

            let err = cli.refresh(Path::new("App.csproj")).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<OverriderError>(),
                Some(OverriderError::CommandTimedOut { .. })
            ));
        }
    }
}
