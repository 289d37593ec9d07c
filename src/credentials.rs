use std::fs;
use std::path::Path;

use crate::console::Console;
use crate::error::WizardError;

const MAX_ATTEMPTS: u32 = 3;
const MAX_LEN: usize = 5000;

/// Gross shape check for a pasted `client_secrets.json`.
///
/// Only the length and the outer braces are checked; the content is not
/// parsed, so `{not real json}` is accepted.
pub fn validate_shape(content: &str) -> bool {
    let len = content.chars().count();
    len > 0 && len < MAX_LEN && content.starts_with('{') && content.ends_with('}')
}

/// Returns the stored credentials if present and well-shaped.
pub fn load_credentials(path: &Path) -> Option<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no readable client secrets");
            return None;
        }
    };

    if validate_shape(&content) {
        Some(content)
    } else {
        tracing::debug!(path = %path.display(), "stored client secrets fail the shape check");
        None
    }
}

/// Write the credential blob verbatim, readable by the owner only.
pub fn store_credentials(path: &Path, content: &str) -> Result<(), WizardError> {
    let save_err = |source| WizardError::SaveCredentials {
        path: path.to_path_buf(),
        source,
    };

    fs::write(path, content).map_err(save_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(save_err)?;
    }

    tracing::info!(path = %path.display(), "client secrets saved");
    Ok(())
}

/// Prompt for pasted credentials until one passes the shape check, then store it.
///
/// Gives up after three invalid pastes, leaving any existing file untouched.
pub fn collect_and_store(path: &Path, console: &mut impl Console) -> Result<(), WizardError> {
    for attempt in 1..=MAX_ATTEMPTS {
        let pasted = console.prompt("Paste your client_secrets.json content")?;
        console.say("Verifying...");

        if validate_shape(&pasted) {
            store_credentials(path, &pasted)?;
            console.say("Successfully verified and saved.");
            return Ok(());
        }

        tracing::debug!(attempt, "rejected client secrets paste");
        console.say("Invalid client_secrets.json format. Please try again.");
    }

    console.say("Too many failed attempts. Exiting...");
    Err(WizardError::CredentialAttemptsExhausted)
}

/// Make sure usable credentials are stored, offering to replace existing ones.
pub fn ensure_credentials(path: &Path, console: &mut impl Console) -> Result<(), WizardError> {
    if load_credentials(path).is_none() {
        console.say("Missing or invalid client_secrets.json. You need to provide a new one.");
        return collect_and_store(path, console);
    }

    let choice =
        console.prompt("Valid client_secrets.json found. Do you want to change it? (y/n)")?;
    if choice == "y" {
        collect_and_store(path, console)
    } else {
        console.say("Using existing client_secrets.json.");
        Ok(())
    }
}
