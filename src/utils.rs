use std::process::{Command, Stdio};

use anyhow::Context;

// Opens `url` in the system browser, detached: the spawned opener gets no
// handles from us and the new browsing context carries no referrer.
pub fn open_in_browser(url: &str) -> Result<(), anyhow::Error> {
    let mut command = opener_command(url);

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open {url}"))?;

    Ok(())
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(url);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    }
}
