//! Users command - list, inspect, authorize and delete users

use anyhow::{Context, Result};
use boruta_admin_core::{Error, ScopeRef, UserEntity};
use clap::Subcommand;
use dialoguer::Confirm;

use super::{completed, get_context, parse_id};
use crate::output;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single user
    Get {
        /// User ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the user the access token belongs to
    Current {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace the authorized scopes of a user
    Scopes {
        /// User ID
        id: String,

        /// Scope ID to authorize (repeatable; none clears all scopes)
        #[arg(long = "scope")]
        scopes: Vec<String>,

        /// Output the saved user as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub async fn run(command: UserCommands) -> Result<()> {
    match command {
        UserCommands::List { json } => run_list(json).await,
        UserCommands::Get { id, json } => run_get(&id, json).await,
        UserCommands::Current { json } => run_current(json).await,
        UserCommands::Scopes { id, scopes, json } => run_scopes(&id, &scopes, json).await,
        UserCommands::Delete { id, force } => run_delete(&id, force).await,
    }
}

async fn run_list(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let users = completed(ctx.users.all().await.context("Failed to list users")?)?;

    if json {
        let values: Vec<_> = users.iter().map(output::user_json).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if users.is_empty() {
        output::info("No users found");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Email", "Scopes"]);
    for user in &users {
        table.add_row(vec![
            output::display_id(user),
            user.email.clone().unwrap_or_else(|| "-".to_string()),
            user.authorized_scopes.len().to_string(),
        ]);
    }
    println!("{}", table);
    println!("{} user(s)", users.len());

    Ok(())
}

async fn run_get(id: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = completed(
        ctx.users
            .get(&parse_id(id))
            .await
            .with_context(|| format!("Failed to fetch user {}", id))?,
    )?;
    show_user(&user, json)
}

async fn run_current(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = completed(ctx.users.current().await.context("Failed to fetch current user")?)?;
    show_user(&user, json)
}

fn show_user(user: &UserEntity, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&output::user_json(user))?);
    } else {
        output::print_user(user);
    }
    Ok(())
}

async fn run_scopes(id: &str, scope_ids: &[String], json: bool) -> Result<()> {
    let ctx = get_context()?;
    let mut user = completed(
        ctx.users
            .get(&parse_id(id))
            .await
            .with_context(|| format!("Failed to fetch user {}", id))?,
    )?;

    user.authorized_scopes.clear();
    for scope_id in scope_ids {
        user.authorize(ScopeRef::persisted(parse_id(scope_id)));
    }

    match ctx.users.save(&mut user).await {
        Ok(outcome) => {
            let saved = completed(outcome)?;
            if json {
                return show_user(saved, true);
            }
            output::success(&format!(
                "Updated user {} with {} authorized scope(s)",
                output::display_id(saved),
                saved.authorized_scopes.len()
            ));
            Ok(())
        }
        Err(err @ (Error::Validation(_) | Error::ServerRejection(_))) => {
            output::error("User was not saved:");
            if let Some(errors) = err.field_errors() {
                output::field_errors(errors);
            }
            Err(err.into())
        }
        Err(err @ Error::Reconcile { .. }) => {
            output::warning("The server accepted the change; fetch the user again before retrying");
            Err(err.into())
        }
        Err(err) => Err(err).context("Failed to save user"),
    }
}

async fn run_delete(id: &str, force: bool) -> Result<()> {
    let ctx = get_context()?;
    let user = completed(
        ctx.users
            .get(&parse_id(id))
            .await
            .with_context(|| format!("Failed to fetch user {}", id))?,
    )?;

    if !force {
        let email = user.email.as_deref().unwrap_or("(no email)");
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete user {} <{}>?", id, email))
            .default(false)
            .interact()?;

        if !confirmed {
            output::info("Cancelled");
            return Ok(());
        }
    }

    completed(ctx.users.destroy(&user).await.context("Failed to delete user")?)?;
    output::success(&format!("Deleted user {}", id));

    Ok(())
}
