//! External formatter invocation.

use std::process::Stdio;

use anyhow::{bail, Context};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Pipe `source` through `program args...` and return its stdout.
pub async fn run_formatter(program: &str, args: &[String], source: &str) -> anyhow::Result<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start formatter '{program}'"))?;

    let mut stdin = child
        .stdin
        .take()
        .context("Formatter stdin was not captured")?;
    let input = source.to_owned();
    let writer = tokio::spawn(async move {
        stdin.write_all(input.as_bytes()).await?;
        stdin.shutdown().await
    });

    let output = child
        .wait_with_output()
        .await
        .with_context(|| format!("Formatter '{program}' did not finish"))?;
    let written = writer.await.context("Formatter input task panicked")?;

    if !output.status.success() {
        bail!(
            "Formatter '{program}' exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    written.with_context(|| format!("Failed to write to formatter '{program}'"))?;
    String::from_utf8(output.stdout).context("Formatter produced invalid UTF-8")
}
