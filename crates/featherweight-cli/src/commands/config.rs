use featherweight_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            remote_url,
            user_id,
            device_name,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            ProfileUpdate {
                remote_url,
                user_id,
                device_name,
            },
            no_activate,
        ),
        ConfigCommands::Show { profile } => {
            run_config_show(profile.as_deref().or(global_profile))
        }
    }
}

/// Explicit values passed to `config init`
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub remote_url: Option<String>,
    pub user_id: Option<String>,
    pub device_name: Option<String>,
}

pub fn run_config_init(
    profile_name: Option<&str>,
    update: ProfileUpdate,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    apply_profile_update(config.profile_mut_or_default(&profile_name), update)?;
    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let profile = config
        .profile(&profile_name)
        .ok_or_else(|| CliError::Config("Failed to persist profile".to_string()))?;
    let missing = missing_fields(profile);
    if missing.is_empty() {
        println!(
            "Profile '{profile_name}' is ready. Set FEATHERWEIGHT_ACCESS_TOKEN and run `featherweight sync`."
        );
    } else {
        println!(
            "Profile '{}' is missing: {}",
            profile_name,
            missing.join(", ")
        );
    }
    Ok(())
}

fn run_config_show(profile_name: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();
    println!("Profile: {profile_name}");
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

/// Overlay explicit values on a stored profile and validate the result.
pub fn apply_profile_update(
    profile: &mut CliProfile,
    update: ProfileUpdate,
) -> Result<(), CliError> {
    let mut updated = profile.clone();
    if let Some(url) = normalize_text_option(update.remote_url) {
        updated.remote_url = Some(url.trim_end_matches('/').to_string());
    }
    if let Some(user_id) = normalize_text_option(update.user_id) {
        updated.user_id = Some(user_id);
    }
    if let Some(device_name) = normalize_text_option(update.device_name) {
        updated.device_name = Some(device_name);
    }

    updated.validate().map_err(CliError::Config)?;
    *profile = updated;
    Ok(())
}

pub fn missing_fields(profile: &CliProfile) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if profile.remote_url().is_none() {
        missing.push("remote_url");
    }
    if normalize_text_option(profile.user_id.clone()).is_none() {
        missing.push("user_id");
    }
    missing
}
