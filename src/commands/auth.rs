use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use countdown_core::config::CountdownConfig;
use countdown_core::session::{
    ConfiguredSession, FileSession, SessionData, SessionProvider, SessionState,
};
use owo_colors::OwoColorize;

fn session_file(config: &CountdownConfig) -> Result<FileSession> {
    Ok(FileSession::new(config.auth.session_path()?))
}

/// `now` plus a humantime duration such as "12h" or "30days".
fn expiry(now: DateTime<Utc>, raw: &str) -> Result<DateTime<Utc>> {
    let duration =
        humantime::parse_duration(raw).with_context(|| format!("Invalid duration '{raw}'"))?;
    let duration = chrono::Duration::from_std(duration)
        .with_context(|| format!("Duration '{raw}' is too long"))?;
    now.checked_add_signed(duration)
        .with_context(|| format!("Duration '{raw}' is too long"))
}

pub fn login(config: &CountdownConfig, token: String, expires_in: Option<&str>) -> Result<()> {
    let token = token.trim().to_string();
    if token.is_empty() {
        anyhow::bail!("Token must not be empty");
    }

    let expires_at = expires_in.map(|raw| expiry(Utc::now(), raw)).transpose()?;

    let session = session_file(config)?;
    session.save(&SessionData {
        access_token: token,
        expires_at,
    })?;

    println!("Saved token to {}", session.path().display());

    if !config.auth.enabled {
        let hint = "Authentication is disabled; \
                    set `enabled = true` under [auth] in config.toml to send it.";
        println!("{}", hint.dimmed());
    } else if config.auth.token.is_some() {
        println!(
            "{}",
            "Note: the token in config.toml takes precedence over the saved session.".dimmed()
        );
    }

    Ok(())
}

pub fn logout(config: &CountdownConfig) -> Result<()> {
    let session = session_file(config)?;

    if session.clear()? {
        println!("Removed {}", session.path().display());
    } else {
        println!("{}", "Not logged in".dimmed());
    }

    Ok(())
}

pub fn status(config: &CountdownConfig) -> Result<()> {
    let provider = ConfiguredSession::from_config(&config.auth)?;

    let source = match &provider {
        ConfiguredSession::Anonymous(_) => "none (authentication disabled)".to_string(),
        ConfiguredSession::Static(_) => "token from config".to_string(),
        ConfiguredSession::File(file) => format!("session file {}", file.path().display()),
    };

    println!("{}", "Authentication".bold());
    println!("  Source:  {source}");

    let state = match provider.session() {
        SessionState::Anonymous => "requests are sent without a token".dimmed().to_string(),
        SessionState::Authenticated(token) if !token.trim().is_empty() => {
            "signed in".green().to_string()
        }
        SessionState::Authenticated(_) | SessionState::NotAuthenticated => {
            "not signed in (run `countdown auth login --token <TOKEN>`)".red().to_string()
        }
    };
    println!("  State:   {state}");

    if let ConfiguredSession::File(file) = &provider {
        if let Some(expires_at) = file.load()?.and_then(|data| data.expires_at) {
            let local = expires_at.with_timezone(&chrono::Local);
            println!("  Expires: {}", local.format("%B %-d, %Y %H:%M"));
        }
    }

    Ok(())
}
