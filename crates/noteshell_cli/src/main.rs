//! `noteshell` command-line entry point.
//!
//! # Responsibility
//! - Bootstrap and mount the application once per process.
//! - Map each subcommand to one session store operation, gated by the
//!   router guard the same way a view would be.
//! - Print results to stdout and queued notifications to stderr.

use clap::{Parser, Subcommand};
use log::error;
use noteshell_core::{
    validate_email, validate_password_strength, App, AppConfig, Credentials, NoteId,
    NotificationLevel, View,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "noteshell", version, about = "Client shell for the notes API")]
struct Cli {
    /// API base URL, e.g. http://localhost:8001/api/v1
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Local storage file holding the session tokens.
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and persist the returned tokens.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "NOTESHELL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "NOTESHELL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Exchange the stored refresh token for a new access token.
    Refresh,
    /// Forget the stored session.
    Logout,
    /// Show whether a session is active.
    Status,
    /// Navigate to a route (by path or name) and report where the guard lands.
    Open { target: String },
    /// List the known routes.
    Routes,
    /// Work with notes.
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },
    /// Show aggregate statistics over your notes.
    Analytics,
}

#[derive(Debug, Subcommand)]
enum NotesCommand {
    List,
    Create { text: String },
    Show { id: NoteId },
    Update { id: NoteId, text: String },
    Delete { id: NoteId },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("noteshell: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }

    let mut app = match App::bootstrap(config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("noteshell: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = app.mount() {
        eprintln!("noteshell: {err}");
        return ExitCode::FAILURE;
    }

    let result = run(&mut app, cli.command).await;
    if let Err(message) = &result {
        error!("event=cli_command module=cli status=error");
        app.notifier_mut().error(message.clone());
    }

    for notification in app.notifier_mut().drain() {
        match notification.level {
            NotificationLevel::Error => eprintln!("error: {}", notification.message),
            level => eprintln!("{}: {}", level.as_str(), notification.message),
        }
    }

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(app: &mut App, command: Command) -> Result<(), String> {
    match command {
        Command::Login { email, password } => {
            enter(app, "/auth", View::Auth)?;
            let credentials = Credentials::new(email.trim(), password);
            app.session_mut()
                .login(&credentials)
                .await
                .map_err(|err| err.to_string())?;
            app.notifier_mut()
                .success(format!("Signed in as {}", credentials.email));
        }
        Command::Register { email, password } => {
            enter(app, "/auth", View::Auth)?;
            let email = validate_email(&email).map_err(|err| err.to_string())?;
            validate_password_strength(&password).map_err(|err| err.to_string())?;
            let profile = app
                .session_mut()
                .register(&Credentials::new(email, password))
                .await
                .map_err(|err| err.to_string())?;
            app.notifier_mut()
                .success(format!("Registered {}; sign in to continue", profile.email));
        }
        Command::Refresh => {
            app.session_mut()
                .refresh_access_token()
                .await
                .map_err(|err| err.to_string())?;
            app.notifier_mut().success("Access token refreshed");
        }
        Command::Logout => {
            let cleared = app.session_mut().logout();
            app.notifier_mut().info("Signed out");
            cleared.map_err(|err| format!("stored session could not be cleared: {err}"))?;
        }
        Command::Status => {
            let signed_in = app.session().is_authenticated();
            println!(
                "{}",
                if signed_in {
                    "authenticated"
                } else {
                    "not authenticated"
                }
            );
            let config = app.config();
            println!("api: {}", config.api_base_url);
            println!("storage: {}", config.storage_path.display());
        }
        Command::Open { target } => {
            let path = app
                .router()
                .routes()
                .by_name(&target)
                .map_or(target.as_str(), |route| route.path)
                .to_string();
            let outcome = app.navigate(&path).map_err(|err| err.to_string())?;
            println!("{} ({})", outcome.entered.path, outcome.entered.name);
            if outcome.was_redirected() {
                app.notifier_mut()
                    .info(format!("{} requires sign-in", outcome.requested.path));
            }
        }
        Command::Routes => {
            for route in app.router().routes().all() {
                let access = if route.requires_auth { "sign-in" } else { "public" };
                println!("{:<12} {:<10} {access}", route.path, route.name);
            }
        }
        Command::Notes { command } => {
            enter(app, "/", View::Home)?;
            run_notes(app, command).await?;
        }
        Command::Analytics => {
            enter(app, "/analytics", View::Analytics)?;
            let analytics = app
                .session_mut()
                .fetch_analytics()
                .await
                .map_err(|err| err.to_string())?;
            print_json(&analytics)?;
        }
    }
    Ok(())
}

async fn run_notes(app: &mut App, command: NotesCommand) -> Result<(), String> {
    match command {
        NotesCommand::List => {
            let notes = app.session_mut().fetch_notes().await.map_err(|err| err.to_string())?;
            print_json(&notes)?;
        }
        NotesCommand::Create { text } => {
            let note = app
                .session_mut()
                .create_note(&text)
                .await
                .map_err(|err| err.to_string())?;
            print_json(&note)?;
            app.notifier_mut().success("Note created");
        }
        NotesCommand::Show { id } => {
            let note = app.session_mut().fetch_note(id).await.map_err(|err| err.to_string())?;
            print_json(&note)?;
        }
        NotesCommand::Update { id, text } => {
            let note = app
                .session_mut()
                .update_note(id, &text)
                .await
                .map_err(|err| err.to_string())?;
            print_json(&note)?;
            app.notifier_mut().success("Note updated");
        }
        NotesCommand::Delete { id } => {
            app.session_mut()
                .delete_note(id)
                .await
                .map_err(|err| err.to_string())?;
            app.notifier_mut().success("Note deleted");
        }
    }
    Ok(())
}

/// Navigates like a view would and fails if the guard redirected away.
fn enter(app: &mut App, path: &str, expected: View) -> Result<(), String> {
    let outcome = app.navigate(path).map_err(|err| err.to_string())?;
    if outcome.entered.view != expected {
        return Err(format!(
            "{} requires sign-in; run `noteshell login` first",
            outcome.requested.path
        ));
    }
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    println!("{rendered}");
    Ok(())
}
