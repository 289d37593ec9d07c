use std::fs;
use std::path::{self, Path, PathBuf};

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::config::ConfigPaths;
use crate::console::{Console, Terminal};
use crate::credentials;
use crate::error::WizardError;
use crate::models::upload::UploadRequest;
use crate::shutdown::ensure_active;
use crate::uploader::{self, SiblingUploader};

const MAX_PATH_ATTEMPTS: u32 = 3;

pub async fn run(shutdown: CancellationToken) -> Result<()> {
    let paths = ConfigPaths::resolve()?;
    paths.ensure_dir()?;

    // Prompts block on the terminal, keep them off the runtime threads
    let token = shutdown.clone();
    let request = tokio::task::spawn_blocking(move || collect(&paths, &mut Terminal, &token))
        .await
        .context("Setup wizard stopped unexpectedly")??;

    ensure_active(&shutdown)?;

    let exe = std::env::current_exe().map_err(WizardError::ExecutablePath)?;
    let expected = uploader::sibling_path(&exe);
    println!("Looking for {} at: {}", uploader::UPLOADER_NAME, expected.display());
    let uploader = SiblingUploader::at(expected)?;
    tracing::debug!(program = %uploader.program().display(), "uploader found");

    uploader::dispatch(&uploader, &request).await?;
    Ok(())
}

/// Walk through the interactive steps and build the request for the uploader.
pub fn collect(
    paths: &ConfigPaths,
    console: &mut impl Console,
    shutdown: &CancellationToken,
) -> Result<UploadRequest, WizardError> {
    ensure_active(shutdown)?;
    console.say("Welcome to Godrive CLI!");

    // 1. Credentials
    credentials::ensure_credentials(&paths.client_secrets, console)?;
    ensure_active(shutdown)?;

    // 2. Upload target
    let source = prompt_upload_path(console)?;
    ensure_active(shutdown)?;

    // 3. Display name, empty keeps the original
    let display_name = console
        .prompt("Enter an optional name for the uploaded file (Press enter to keep original)")?;
    ensure_active(shutdown)?;

    // 4. Saved sign-in
    review_auth_marker(&paths.auth_marker, console)?;
    ensure_active(shutdown)?;

    Ok(UploadRequest::new(source, display_name))
}

/// Resolve `input` against the current directory and check that it exists.
pub fn verify_path(input: &str) -> Option<PathBuf> {
    let absolute = match path::absolute(input) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(input, error = %e, "unable to resolve path");
            return None;
        }
    };

    match fs::metadata(&absolute) {
        Ok(_) => Some(absolute),
        Err(e) => {
            tracing::debug!(path = %absolute.display(), error = %e, "path not accessible");
            None
        }
    }
}

/// Ask for an existing file or directory, allowing three invalid answers.
pub fn prompt_upload_path(console: &mut impl Console) -> Result<PathBuf, WizardError> {
    for attempt in 1..=MAX_PATH_ATTEMPTS {
        let answer = console.prompt("Enter the full path of the file/directory to upload")?;
        let answer = answer.trim();

        if answer.is_empty() {
            console.say("Error: Path cannot be empty. Please enter a valid path.");
        } else if let Some(path) = verify_path(answer) {
            tracing::info!(path = %path.display(), "upload target selected");
            return Ok(path);
        } else {
            console.say("Error: The specified file/directory does not exist. Try again.");
        }
        tracing::debug!(attempt, "invalid upload path");
    }

    console.say("Too many invalid attempts. Exiting...");
    Err(WizardError::PathAttemptsExhausted)
}

/// Offer to forget a saved sign-in. Only an exact `n` removes the marker.
pub fn review_auth_marker(marker: &Path, console: &mut impl Console) -> Result<(), WizardError> {
    if !marker.exists() {
        return Ok(());
    }

    let answer = console.prompt(
        "Previous upload was done on a saved account. Do you want to use the same account? (y/n)",
    )?;
    if answer != "n" {
        console.say("Using existing authentication.");
        return Ok(());
    }

    match fs::remove_file(marker) {
        Ok(()) => console.say("Old authentication removed. You will need to authenticate again."),
        Err(e) => tracing::warn!(path = %marker.display(), error = %e, "failed to remove auth marker"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    const SECRETS: &str = r#"{"installed":{"client_id":"abc"}}"#;

    fn fresh_config() -> (tempfile::TempDir, ConfigPaths) {
        let tmp = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::in_dir(tmp.path().join(".godrive"));
        (tmp, paths)
    }

    #[test]
    fn existing_path_is_made_absolute() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("notes.txt");
        fs::write(&file, "hi").unwrap();

        let resolved = verify_path(file.to_str().unwrap()).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, file);

        assert!(verify_path(tmp.path().join("missing.txt").to_str().unwrap()).is_none());
    }

    #[test]
    fn empty_and_missing_paths_each_use_an_attempt() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope").display().to_string();
        let mut console = ScriptedConsole::new(["", missing.as_str(), "   ", "/never/asked"]);

        let err = prompt_upload_path(&mut console).unwrap_err();

        assert!(matches!(err, WizardError::PathAttemptsExhausted));
        assert_eq!(console.remaining(), 1);
        assert!(console.said("Path cannot be empty"));
        assert!(console.said("does not exist"));
    }

    #[test]
    fn directory_is_accepted_after_a_typo() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().display().to_string();
        let typo = format!("{dir}-typo");
        let padded = format!("  {dir}  ");
        let mut console = ScriptedConsole::new([typo.as_str(), padded.as_str()]);

        let path = prompt_upload_path(&mut console).unwrap();

        assert_eq!(path, tmp.path());
    }

    #[test]
    fn exact_n_removes_the_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let marker = tmp.path().join("auth.txt");
        fs::write(&marker, "token").unwrap();

        let mut console = ScriptedConsole::new(["n"]);
        review_auth_marker(&marker, &mut console).unwrap();

        assert!(!marker.exists());
    }

    #[test]
    fn anything_else_keeps_the_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let marker = tmp.path().join("auth.txt");
        fs::write(&marker, "token").unwrap();

        for answer in ["y", "", "N", "no", " n", "whatever"] {
            let mut console = ScriptedConsole::new([answer]);
            review_auth_marker(&marker, &mut console).unwrap();
            assert!(marker.exists(), "marker removed for answer {answer:?}");
        }
    }

    #[test]
    fn no_marker_means_no_question() {
        let tmp = tempfile::tempdir().unwrap();
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        review_auth_marker(&tmp.path().join("auth.txt"), &mut console).unwrap();

        assert!(console.prompts.is_empty());
    }

    #[test]
    fn cancelled_before_start_asks_nothing() {
        let (_tmp, paths) = fresh_config();
        let token = CancellationToken::new();
        token.cancel();
        let mut console = ScriptedConsole::new([SECRETS]);

        let err = collect(&paths, &mut console, &token).unwrap_err();

        assert!(matches!(err, WizardError::Cancelled));
        assert!(console.prompts.is_empty());
    }

    #[test]
    fn running_out_of_input_is_an_error() {
        let (_tmp, paths) = fresh_config();
        paths.ensure_dir().unwrap();
        let mut console = ScriptedConsole::new([SECRETS]);

        let err = collect(&paths, &mut console, &CancellationToken::new()).unwrap_err();

        assert!(matches!(err, WizardError::InputClosed));
        assert!(paths.client_secrets.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn first_run_end_to_end() {
        use crate::uploader::testing::{RecordingUploader, exited};

        let (tmp, paths) = fresh_config();
        assert!(!paths.dir.exists());
        paths.ensure_dir().unwrap();
        assert!(paths.dir.is_dir());

        let target = tmp.path().join("holiday.jpg");
        fs::write(&target, "jpeg").unwrap();
        let target_answer = target.display().to_string();

        let mut console =
            ScriptedConsole::new(["not json", SECRETS, target_answer.as_str(), ""]);
        let request = collect(&paths, &mut console, &CancellationToken::new()).unwrap();

        assert_eq!(console.remaining(), 0);
        assert_eq!(fs::read_to_string(&paths.client_secrets).unwrap(), SECRETS);
        assert_eq!(request, UploadRequest::new(&target, ""));

        let uploader = RecordingUploader::new(|| exited(0));
        uploader::dispatch(&uploader, &request).await.unwrap();

        assert_eq!(uploader.calls(), vec![UploadRequest::new(&target, "")]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn returning_user_forgets_saved_account() {
        use crate::uploader::testing::{RecordingUploader, exited};

        let (tmp, paths) = fresh_config();
        paths.ensure_dir().unwrap();
        fs::write(&paths.client_secrets, SECRETS).unwrap();
        fs::write(&paths.auth_marker, "saved").unwrap();

        let target = tmp.path().display().to_string();
        let mut console = ScriptedConsole::new(["n", target.as_str(), "Backup", "n"]);
        let request = collect(&paths, &mut console, &CancellationToken::new()).unwrap();

        assert!(!paths.auth_marker.exists());
        assert_eq!(request.display_name, "Backup");

        let uploader = RecordingUploader::new(|| exited(1));
        let err = uploader::dispatch(&uploader, &request).await.unwrap_err();
        assert!(matches!(err, WizardError::UploadFailed));
    }
}
