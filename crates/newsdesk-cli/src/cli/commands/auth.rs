//! Sign-in, registration and sign-out.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use newsdesk_core::models::{Credentials, Registration};
use newsdesk_core::services::Services;
use newsdesk_core::session::{self, Session};

/// Reads the password from the first line of stdin.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush()?;
    }
    let mut line = String::new();
    stdin.lock().read_line(&mut line).context("read password")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Password is required");
    }
    Ok(password)
}

fn print_signed_in(session: &Session) {
    if let Some(user) = session.user() {
        println!("Signed in as {} <{}>", user.display_name(), user.email);
    }
}

pub async fn login(services: &Services, email: &str) -> Result<()> {
    let credentials = Credentials {
        email: email.trim().to_string(),
        password: read_password()?,
    };
    let session = session::login(
        services.auth.as_ref(),
        services.tokens.as_ref(),
        &credentials,
    )
    .await
    .map_err(|err| anyhow::anyhow!(err.user_message()))
    .context("sign in")?;
    print_signed_in(&session);
    Ok(())
}

pub async fn register(services: &Services, name: &str, email: &str) -> Result<()> {
    let registration = Registration {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: read_password()?,
    };
    let session = session::register(
        services.auth.as_ref(),
        services.tokens.as_ref(),
        &registration,
    )
    .await
    .map_err(|err| anyhow::anyhow!(err.user_message()))
    .context("register")?;
    print_signed_in(&session);
    Ok(())
}

pub fn logout(services: &Services) -> Result<()> {
    session::logout(services.tokens.as_ref());
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(services: &Services) -> Result<()> {
    let session = session::restore(services.auth.as_ref(), services.tokens.as_ref()).await;
    if session.is_logged_in() {
        print_signed_in(&session);
    } else {
        println!("Not signed in.");
    }
    Ok(())
}
