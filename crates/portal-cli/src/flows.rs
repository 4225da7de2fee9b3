use crate::{CliError, CliResult, Prompter};

use portal_auth::{AuthError, Candidate, CredentialGate, ErrorKind, RejectionReason};
use portal_core::SessionUser;

use std::io::{BufRead, Write};

use log::debug;

/// Errors the participant can fix by typing something else.
fn can_retry_input(err: &AuthError) -> bool {
    err.kind() == ErrorKind::Validation
        || matches!(
            err.rejection_reason(),
            Some(RejectionReason::PhoneMismatch | RejectionReason::WrongPin)
        )
}

pub(crate) async fn search(gate: &CredentialGate, fragment: &str) -> CliResult<Vec<Candidate>> {
    let candidates = gate.resolver().search(fragment).await?;
    if candidates.is_empty() {
        return Err(CliError::NoCandidates {
            fragment: fragment.trim().to_string(),
        });
    }
    Ok(candidates)
}

fn select<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    candidates: &[Candidate],
) -> CliResult<Candidate> {
    match prompter.choose(candidates)? {
        Some(index) => Ok(candidates[index].clone()),
        None => Err(CliError::Cancelled),
    }
}

/// Select, prove the phone number, then choose a first PIN.
pub(crate) async fn register<R: BufRead, W: Write>(
    gate: &CredentialGate,
    prompter: &mut Prompter<R, W>,
    fragment: &str,
) -> CliResult<SessionUser> {
    let candidates = search(gate, fragment).await?;

    loop {
        gate.start_over().await;
        let candidate = select(prompter, &candidates)?;
        gate.begin_registration(candidate).await?;

        if !confirm_phone(gate, prompter).await? {
            debug!("Registration restarted at phone prompt");
            continue;
        }
        if let Some(user) = choose_pin(gate, prompter).await? {
            return Ok(user);
        }
        debug!("Registration restarted at PIN prompt");
    }
}

/// Select, then enter the existing PIN until it matches or the participant gives up.
pub(crate) async fn login<R: BufRead, W: Write>(
    gate: &CredentialGate,
    prompter: &mut Prompter<R, W>,
    fragment: &str,
) -> CliResult<SessionUser> {
    let candidates = search(gate, fragment).await?;

    loop {
        gate.start_over().await;
        let candidate = select(prompter, &candidates)?;
        gate.begin_login(candidate).await?;

        while let Some(pin) = prompter.ask("PIN")? {
            match gate.verify_pin(&pin).await {
                Ok(user) => return Ok(user),
                Err(e) if can_retry_input(&e) => prompter.say(e.user_message())?,
                Err(e) => return Err(e.into()),
            }
        }
        debug!("Login restarted at PIN prompt");
    }
}

async fn confirm_phone<R: BufRead, W: Write>(
    gate: &CredentialGate,
    prompter: &mut Prompter<R, W>,
) -> CliResult<bool> {
    while let Some(phone) = prompter.ask("Phone number")? {
        match gate.submit_phone(&phone).await {
            Ok(_) => return Ok(true),
            Err(e) if can_retry_input(&e) => prompter.say(e.user_message())?,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(false)
}

async fn choose_pin<R: BufRead, W: Write>(
    gate: &CredentialGate,
    prompter: &mut Prompter<R, W>,
) -> CliResult<Option<SessionUser>> {
    loop {
        let Some(pin) = prompter.ask("New 4-digit PIN")? else {
            return Ok(None);
        };
        let Some(confirmation) = prompter.ask("Confirm PIN")? else {
            return Ok(None);
        };

        match gate.set_pin(&pin, &confirmation).await {
            Ok(user) => return Ok(Some(user)),
            Err(e) if can_retry_input(&e) => prompter.say(e.user_message())?,
            Err(e) => return Err(e.into()),
        }
    }
}
