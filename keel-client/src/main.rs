use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dialoguer::Password;
use env_logger::{Builder, Target};
use keel_client::app::ProfileRuntime;
use keel_client::domains::profile::{Feedback, ProfileMessage, ProfileServices};
use keel_client::infra::services::{GoTrueAuthClient, RestProfileStore};
use keel_client::infra::config::ENV_ACCESS_TOKEN;
use keel_client::infra::{ApiClient, Config, LoggingRouter};
use keel_model::{PasswordField, ProfileField, Route, SecureCredential};
use log::LevelFilter;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "keel-account", about = "View and edit your Keel account")]
struct Cli {
    /// Backend base URL (overrides config and KEEL_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the profile's name fields
    Show,
    /// Change one or more name fields and save
    SetName {
        #[arg(long)]
        first: Option<String>,
        #[arg(long)]
        middle: Option<String>,
        #[arg(long)]
        last: Option<String>,
    },
    /// Prompt for a new password and change it
    ChangePassword,
    /// End the session and forget the stored token
    Logout,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("keel_client", LevelFilter::Debug)
        .init();
}

fn report(feedback: Option<&Feedback>) -> Result<()> {
    match feedback {
        Some(f) if f.is_success() => {
            println!("{}", f);
            Ok(())
        }
        Some(f) => bail!("{}", f),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let mut config = Config::load();
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }
    log::debug!("Loaded {:?}", config);

    let api = Arc::new(
        ApiClient::from_config(&config).context("building HTTP client")?,
    );
    let auth = Arc::new(GoTrueAuthClient::new(api.clone()));
    auth.restore().await.context("restoring session")?;

    let store = Arc::new(RestProfileStore::new(
        api.clone(),
        config.profile_table.clone(),
    ));
    let router = Arc::new(LoggingRouter::new());
    let services = ProfileServices::new(store, auth.clone());
    let mut runtime = ProfileRuntime::new(services, router.clone());

    runtime.subscribe_identity(auth.as_ref());
    runtime.run_until_idle().await;

    if router.last_route() == Some(Route::Login) {
        bail!(
            "Not signed in. Set KEEL_ACCESS_TOKEN or add access_token to {}",
            Config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the config file".to_string())
        );
    }

    match cli.command {
        Command::Show => {
            let state = runtime.state();
            report(state.profile_feedback.as_ref())?;
            println!("First name:  {}", state.fields.first_name);
            println!("Middle name: {}", state.fields.middle_name);
            println!("Last name:   {}", state.fields.last_name);
        }
        Command::SetName {
            first,
            middle,
            last,
        } => {
            // A failed load leaves the other fields blank; saving would wipe them.
            report(runtime.state().profile_feedback.as_ref())?;

            let edits = [
                (ProfileField::FirstName, first),
                (ProfileField::MiddleName, middle),
                (ProfileField::LastName, last),
            ];
            for (field, value) in edits {
                if let Some(value) = value {
                    runtime.dispatch(ProfileMessage::UpdateField(field, value));
                }
            }
            runtime.dispatch(ProfileMessage::SubmitProfile);
            runtime.run_until_idle().await;
            report(runtime.state().profile_feedback.as_ref())?;
        }
        Command::ChangePassword => {
            let new_password = Password::new()
                .with_prompt("New password")
                .interact()
                .context("reading new password")?;
            let confirm = Password::new()
                .with_prompt("Confirm new password")
                .interact()
                .context("reading password confirmation")?;

            runtime.dispatch(ProfileMessage::UpdatePasswordField(
                PasswordField::NewPassword,
                SecureCredential::from(new_password),
            ));
            runtime.dispatch(ProfileMessage::UpdatePasswordField(
                PasswordField::ConfirmNewPassword,
                SecureCredential::from(confirm),
            ));
            runtime.dispatch(ProfileMessage::SubmitPasswordChange);
            runtime.run_until_idle().await;
            report(runtime.state().password_feedback.as_ref())?;
        }
        Command::Logout => {
            runtime.dispatch(ProfileMessage::Logout);
            runtime.run_until_idle().await;

            if let Some(path) = Config::config_path()
                && let Err(e) = Config::clear_stored_token(&path)
            {
                log::warn!("Could not clear stored token: {}", e);
            }
            if Config::token_from_env(|key| std::env::var(key).ok()) {
                log::warn!(
                    "{} is still set; the next run will sign in with it again",
                    ENV_ACCESS_TOKEN
                );
            }
            println!("Signed out.");
        }
    }

    Ok(())
}
