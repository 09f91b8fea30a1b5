use crate::devices::{AudioDevice, DeviceConfig};
use crate::services::coordinator::{ApplyOutcome, DeviceSnapshot, LaunchMethod, RelaunchStatus};
use crate::services::identity::AppVariant;
use crate::services::selection::SelectionEntry;
use anyhow::Result;
use serde_json::json;

/// Печать результатов команд в stdout: текстом или JSON
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn not_installed(&self, download_url: &str) -> Result<()> {
        if self.json {
            self.emit(&json!({ "installed": false, "downloadUrl": download_url }))
        } else {
            println!("superwhisper не установлен. Скачать: {}", download_url);
            Ok(())
        }
    }

    pub fn snapshot(&self, snapshot: &DeviceSnapshot) -> Result<()> {
        let entries = snapshot.entries();
        if self.json {
            return self.emit(&json!({
                "installed": true,
                "variant": snapshot.variant,
                "config": snapshot.config,
                "entries": entries,
            }));
        }

        for entry in &entries {
            println!("{}", format_entry(entry));
        }
        Ok(())
    }

    pub fn config(&self, variant: Option<AppVariant>, config: &DeviceConfig) -> Result<()> {
        if self.json {
            return self.emit(&json!({ "variant": variant, "config": config }));
        }

        match variant {
            Some(variant) => println!("Вариант: {}", variant),
            None => println!("Вариант: не найден (приложение ещё не запускалось?)"),
        }
        println!("Микрофон: {}", config);
        Ok(())
    }

    pub fn device(&self, device: &AudioDevice) -> Result<()> {
        if self.json {
            self.emit(device)
        } else {
            println!("{}", device);
            Ok(())
        }
    }

    pub fn applied(&self, target: &str, outcome: &ApplyOutcome) -> Result<()> {
        if self.json {
            let (relaunched, method, warning) = match &outcome.relaunch {
                RelaunchStatus::Relaunched(method) => (true, Some(method), None),
                RelaunchStatus::NotConfirmed(reason) => (false, None, Some(reason)),
            };
            return self.emit(&json!({
                "applied": target,
                "relaunched": relaunched,
                "method": method,
                "warning": warning,
            }));
        }

        println!("superwhisper: выбрано {}", target);
        match &outcome.relaunch {
            RelaunchStatus::Relaunched(LaunchMethod::Url(variant)) => {
                println!("Приложение перезапущено ({})", variant)
            }
            RelaunchStatus::Relaunched(LaunchMethod::ByName) => {
                println!("Приложение перезапущено по имени")
            }
            RelaunchStatus::NotConfirmed(_) => {
                if let Some(warning) = outcome.warning() {
                    println!("Внимание: {}", warning);
                }
            }
        }
        Ok(())
    }

    fn emit<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn format_entry(entry: &SelectionEntry) -> String {
    let marker = if entry.selected { "●" } else { "○" };
    let mut line = format!("{} {}", marker, entry.title);

    if let Some(subtitle) = &entry.subtitle {
        line.push_str(&format!(" — {}", subtitle));
    }
    if let (Some(uid), Some(transport)) = (&entry.uid, entry.transport_type) {
        line.push_str(&format!("  [{}] {}", transport, uid));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::TransportType;

    #[test]
    fn test_format_entry() {
        let entry = SelectionEntry {
            title: "Mic2".to_string(),
            uid: Some("B".to_string()),
            subtitle: None,
            transport_type: Some(TransportType::Bluetooth),
            selected: true,
        };
        assert_eq!(format_entry(&entry), "● Mic2  [Bluetooth] B");

        let entry = SelectionEntry {
            title: "System Default".to_string(),
            uid: None,
            subtitle: Some("MacBook Pro Microphone".to_string()),
            transport_type: None,
            selected: false,
        };
        assert_eq!(format_entry(&entry), "○ System Default — MacBook Pro Microphone");
    }
}
