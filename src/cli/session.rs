//! Login and connectivity commands

use tracing::info;

use crate::client::RecordStore;
use crate::config::{Settings, SpendwisePaths};
use crate::error::SpendwiseResult;
use crate::models::UserProfile;

/// Report the logged-in profile and remember the username for next time
pub fn handle_login_command(
    profile: &UserProfile,
    paths: &SpendwisePaths,
    settings: &mut Settings,
    remember: bool,
) -> SpendwiseResult<()> {
    println!("Logged in as {}", profile.username);
    if !profile.email.is_empty() {
        println!("Email: {}", profile.email);
    }

    if remember && settings.username.as_deref() != Some(profile.username.as_str()) {
        settings.username = Some(profile.username.clone());
        settings.save(paths)?;
        info!(username = %profile.username, "username saved to settings");
        println!("Username saved to {}", paths.settings_file().display());
    }

    Ok(())
}

/// Ping the record store
pub fn handle_health_command(store: &dyn RecordStore) -> SpendwiseResult<()> {
    let health = store.health()?;
    match health.timestamp {
        Some(timestamp) => println!("Record store status: {} ({})", health.status, timestamp),
        None => println!("Record store status: {}", health.status),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_login_remembers_username() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();
        let profile = UserProfile {
            username: "demo".into(),
            email: "demo@spendwise.com".into(),
        };

        handle_login_command(&profile, &paths, &mut settings, true).unwrap();
        assert_eq!(settings.username.as_deref(), Some("demo"));

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reloaded.username.as_deref(), Some("demo"));
    }

    #[test]
    fn test_health() {
        let store = MemoryStore::seeded(NaiveDate::from_ymd_opt(2024, 4, 20).unwrap());
        handle_health_command(&store).unwrap();
    }
}
