use fixwell_core::errors::CoreError;
use fixwell_db::StoreService;

use crate::cli::SettingsCommands;

pub async fn run(service: &StoreService, action: &SettingsCommands) -> anyhow::Result<()> {
    match action {
        SettingsCommands::Get { key } => {
            let setting = service
                .get_setting(key)
                .await?
                .ok_or_else(|| CoreError::NotFound {
                    entity_type: "setting".into(),
                    id: key.clone(),
                })?;
            println!("{}", setting.value);
        }
        SettingsCommands::Set { key, value } => {
            service.set_setting(key, value).await?;
            println!("{key} updated");
        }
        SettingsCommands::List => {
            let settings = service.list_settings().await?;
            for setting in &settings {
                println!("{:<16} {}", setting.key, setting.value);
            }
        }
        SettingsCommands::Rm { key } => {
            if service.delete_setting(key).await? {
                println!("{key} removed");
            } else {
                println!("{key} not found");
            }
        }
    }
    Ok(())
}
