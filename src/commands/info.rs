use anyhow::Result;

const TOOL_INFO: &str = "
Godrive CLI Tool
----------------
A command-line tool to easily upload files and directories to Google Drive.

Features:
- First-time setup of Google client credentials
- Supports file and directory uploads
- Reuses a previous sign-in when one is saved

Configuration lives in ~/.godrive (override with GODRIVE_HOME).
The transfer itself is done by the godrive_upload helper installed
next to this executable.
";

pub fn run() -> Result<()> {
    println!("{TOOL_INFO}");
    Ok(())
}
