use dialoguer::Input;
use eyre::{eyre, Context, Result};

/// Reads one line, an empty line is accepted and returned as typed.
pub fn user_input(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}
