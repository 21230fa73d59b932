//! Account and usage subcommands.

use anyhow::Result;
use unveil_client::ApiClient;
use unveil_types::{LoginRequest, RegisterRequest, UpdateProfileRequest, UsageSnapshot};

use super::prompt;
use crate::TOKEN_ENV;

pub async fn register(
    api: &mut ApiClient,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<()> {
    let password = prompt("Password: ").await?;
    let response = api
        .register(&RegisterRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password,
        })
        .await?;
    println!("Registered {email} (user id {})", response.user_id);
    println!("export {TOKEN_ENV}={}", response.token);
    Ok(())
}

pub async fn login(api: &mut ApiClient, email: &str) -> Result<()> {
    let password = prompt("Password: ").await?;
    let response = api
        .login(&LoginRequest {
            email: email.to_string(),
            password,
        })
        .await?;
    println!("Logged in as {email}");
    println!("export {TOKEN_ENV}={}", response.token);
    Ok(())
}

pub async fn profile(api: &ApiClient) -> Result<()> {
    let profile = api.profile().await?;
    println!(
        "{} {} <{}>",
        profile.first_name, profile.last_name, profile.email
    );
    print_usage(&profile.usage);
    Ok(())
}

pub async fn update_profile(
    api: &ApiClient,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    if first_name.is_none() && last_name.is_none() && email.is_none() {
        println!("Nothing to update; pass --first-name, --last-name, or --email.");
        return Ok(());
    }
    let profile = api
        .update_profile(&UpdateProfileRequest {
            first_name,
            last_name,
            email,
        })
        .await?;
    println!(
        "Profile updated: {} {} <{}>",
        profile.first_name, profile.last_name, profile.email
    );
    Ok(())
}

pub async fn delete(api: &mut ApiClient, yes: bool) -> Result<()> {
    if !yes {
        let answer = prompt("Delete this account and its usage history? [y/N] ").await?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }
    api.delete_account().await?;
    println!("Account deleted.");
    Ok(())
}

pub async fn status(api: &ApiClient) -> Result<()> {
    let usage = api.usage_status().await?;
    print_usage(&usage);
    Ok(())
}

fn print_usage(usage: &UsageSnapshot) {
    println!("Timers started: {}", usage.timers_started);
    println!("Plan: {}", plan_label(usage));
}

fn plan_label(usage: &UsageSnapshot) -> &'static str {
    if usage.has_paid {
        "paid"
    } else if usage.trial_over {
        "trial ended (sessions capped until payment)"
    } else {
        "trial"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_label_tracks_the_snapshot_flags() {
        let mut usage = UsageSnapshot::fresh();
        assert_eq!(plan_label(&usage), "trial");

        usage.trial_over = true;
        assert_eq!(plan_label(&usage), "trial ended (sessions capped until payment)");

        usage.has_paid = true;
        assert_eq!(plan_label(&usage), "paid");
    }
}
