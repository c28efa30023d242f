use anyhow::bail;
use inquire::Password;

use super::open_app;
use crate::query::decode_collection;
use crate::store::RemoteStore;
use crate::types::{Session, SessionPatch, User, collections};

pub fn run_session_login(
    data_dir: &str,
    email: String,
    password: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let email = email.trim().to_string();
    if email.is_empty() {
        bail!("Email cannot be empty");
    }

    let app = open_app(data_dir)?;

    let password = if let Some(p) = password {
        p
    } else if non_interactive {
        bail!("--password is required in non-interactive mode");
    } else {
        Password::new("Password:").without_confirmation().prompt()?
    };

    let users = decode_collection::<User>(
        collections::USERS,
        &app.remote.get(collections::USERS)?,
        |_| true,
    );
    let Some(user) = users
        .into_iter()
        .find(|u| u.value.email.eq_ignore_ascii_case(&email))
    else {
        bail!("No user registered with email '{email}'. Run 'estufa db populate' to create sample users.");
    };

    if user.value.password != password {
        bail!("Invalid password for '{email}'");
    }

    let auth = app.auth();
    auth.login(Session::new(
        user.id,
        user.value.email,
        user.value.name.clone(),
        Some(password),
    ));

    println!("Logged in as {}", user.value.name);
    Ok(())
}

pub fn run_session_logout(data_dir: &str) -> anyhow::Result<()> {
    let app = open_app(data_dir)?;
    let auth = app.auth();

    if auth.is_authenticated() {
        auth.logout();
        println!("Logged out");
    } else {
        auth.logout();
        println!("Not logged in");
    }
    Ok(())
}

pub fn run_session_show(data_dir: &str, json: bool) -> anyhow::Result<()> {
    let app = open_app(data_dir)?;
    let session = app.auth().session();

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    match session {
        Some(session) => {
            println!("id:    {}", session.id);
            println!("name:  {}", session.name);
            println!("email: {}", session.email);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

pub fn run_session_update(
    data_dir: &str,
    name: Option<String>,
    email: Option<String>,
) -> anyhow::Result<()> {
    let patch = SessionPatch {
        name,
        email,
        ..Default::default()
    };
    if patch.is_empty() {
        bail!("Nothing to update. Pass --name and/or --email.");
    }

    let app = open_app(data_dir)?;
    let auth = app.auth();
    if !auth.update_session(&patch) {
        bail!("Not logged in. Run 'estufa session login' first.");
    }

    if let Some(session) = auth.session() {
        println!("Updated session for {} <{}>", session.name, session.email);
    }
    Ok(())
}
