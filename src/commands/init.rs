//! Application configuration initialization command.
//!
//! Interactive setup wizard for first-time use: picks the active user
//! namespace, the default session length, and the user's notification
//! preferences.

use crate::{
    db::records::RecordStore,
    libs::{
        config::Config,
        messages::Message,
        settings::{NotificationPreferences, SettingsPatch},
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, MultiSelect};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Skip the notification preference prompts and keep stored values
    #[arg(short, long)]
    skip_preferences: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    // User identifier and session defaults live in the app config file.
    let config = Config::init()?;
    config.save()?;

    if !init_args.skip_preferences {
        let user = config.require_user()?;
        let store = RecordStore::for_user(&user)?;
        let current = store.settings()?.notifications;

        let items = [
            "Notifications enabled",
            "Study session reminders",
            "Deadline alerts (24h before)",
            "Daily motivational tips",
            "Break reminders",
            "Notification sound",
        ];
        let defaults = [
            current.enabled,
            current.study_reminders,
            current.deadline_alerts,
            current.motivational_tips,
            current.break_reminders,
            current.sound,
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Notification preferences (space toggles, enter confirms)")
            .items(&items)
            .defaults(&defaults)
            .interact()?;

        let preferences = NotificationPreferences {
            enabled: selected.contains(&0),
            study_reminders: selected.contains(&1),
            deadline_alerts: selected.contains(&2),
            motivational_tips: selected.contains(&3),
            break_reminders: selected.contains(&4),
            sound: selected.contains(&5),
        };
        store.update_settings(SettingsPatch {
            notifications: Some(preferences),
        })?;
    }

    msg_success!(Message::ConfigSaved);
    Ok(())
}
