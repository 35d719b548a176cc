//! Subcommand handlers
//!
//! The core stays silent about no-ops; here unknown ids become errors so a
//! script can tell that nothing happened.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use serde_json::Value;
use tracing::info;

use multi_search_core::{
    frames_for, Action, Dashboard, EnginePatch, ImportOutcome, KeyValueStore, Profile,
    ProfilePatch, EXPORT_FILE_NAME,
};

use crate::Command;

pub fn run<S: KeyValueStore, W: Write>(
    dashboard: &mut Dashboard<S>,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Profiles => {
            let selected = dashboard.store().selected_profile().map(|p| p.id.clone());
            for profile in dashboard.store().profiles() {
                let marker = if Some(&profile.id) == selected.as_ref() { '*' } else { ' ' };
                writeln!(
                    out,
                    "{} {}\t{}\t{} engines",
                    marker,
                    profile.id,
                    profile.name,
                    profile.engines.len()
                )?;
            }
        }
        Command::Select { profile_id } => {
            require_profile(dashboard, &profile_id)?;
            dashboard.dispatch(Action::SelectProfile { profile_id });
        }
        Command::Urls { profile, query } => {
            let query = query.join(" ");
            let query = query.trim();
            let profile = match profile {
                Some(id) => require_profile(dashboard, &id)?,
                None => dashboard
                    .store()
                    .selected_profile()
                    .context("no profiles configured")?,
            };
            for frame in frames_for(profile, query) {
                writeln!(out, "{}\t{}", frame.name, frame.url)?;
            }
        }
        Command::AddEngine {
            profile_id,
            name,
            template,
        } => {
            let engine_id = dashboard
                .add_engine(&profile_id)
                .with_context(|| format!("no profile '{}'", profile_id))?;
            let patch = EnginePatch {
                name,
                url_template: template,
            };
            if !patch.is_empty() {
                dashboard.dispatch(Action::UpdateEngine {
                    profile_id,
                    engine_id: engine_id.clone(),
                    patch,
                });
            }
            writeln!(out, "{}", engine_id)?;
        }
        Command::UpdateEngine {
            profile_id,
            engine_id,
            name,
            template,
        } => {
            let patch = EnginePatch {
                name,
                url_template: template,
            };
            if patch.is_empty() {
                bail!("nothing to update: pass --name and/or --template");
            }
            require_engine(dashboard, &profile_id, &engine_id)?;
            dashboard.dispatch(Action::UpdateEngine {
                profile_id,
                engine_id,
                patch,
            });
        }
        Command::RemoveEngine {
            profile_id,
            engine_id,
        } => {
            require_engine(dashboard, &profile_id, &engine_id)?;
            dashboard.dispatch(Action::RemoveEngine {
                profile_id,
                engine_id,
            });
        }
        Command::RenameProfile { profile_id, name } => {
            require_profile(dashboard, &profile_id)?;
            dashboard.dispatch(Action::RenameProfile { profile_id, name });
        }
        Command::Resize {
            profile_id,
            min_width,
            min_height,
        } => {
            require_profile(dashboard, &profile_id)?;
            dashboard.dispatch(Action::UpdateProfile {
                profile_id,
                patch: ProfilePatch {
                    min_width,
                    min_height,
                    ..ProfilePatch::default()
                },
            });
        }
        Command::Export { output } => {
            let json = dashboard.export_json()?;
            match output {
                Some(path) if path.as_os_str() == "-" => writeln!(out, "{}", json)?,
                output => {
                    let path = output.unwrap_or_else(|| EXPORT_FILE_NAME.into());
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Exported configuration to {:?}", path);
                    writeln!(out, "{}", path.display())?;
                }
            }
        }
        Command::Import { path } => import(dashboard, &path, out)?,
    }

    Ok(())
}

fn import<S: KeyValueStore, W: Write>(
    dashboard: &mut Dashboard<S>,
    path: &Path,
    out: &mut W,
) -> anyhow::Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let outcome = dashboard.import_value(&value);
    for record in outcome.dropped() {
        writeln!(out, "dropped {}", record)?;
    }

    match outcome {
        ImportOutcome::Accepted {
            profiles,
            selected_profile_id,
            ..
        } => {
            writeln!(
                out,
                "imported {} profiles, selected {}",
                profiles.len(),
                selected_profile_id
            )?;
            Ok(())
        }
        ImportOutcome::Rejected { reason, .. } => bail!("import rejected: {}", reason),
    }
}

fn require_profile<'a, S: KeyValueStore>(
    dashboard: &'a Dashboard<S>,
    profile_id: &str,
) -> anyhow::Result<&'a Profile> {
    dashboard
        .store()
        .profile(profile_id)
        .with_context(|| format!("no profile '{}'", profile_id))
}

fn require_engine<S: KeyValueStore>(
    dashboard: &Dashboard<S>,
    profile_id: &str,
    engine_id: &str,
) -> anyhow::Result<()> {
    let profile = require_profile(dashboard, profile_id)?;
    if profile.engine(engine_id).is_none() {
        bail!("no engine '{}' in profile '{}'", engine_id, profile_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use multi_search_core::MemoryStore;

    fn exec(dashboard: &mut Dashboard<MemoryStore>, command: Command) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(dashboard, command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_urls_for_selected_profile() {
        let mut dashboard = Dashboard::open(MemoryStore::new());
        let out = exec(
            &mut dashboard,
            Command::Urls {
                profile: None,
                query: vec!["cats".to_string()],
            },
        )
        .unwrap();

        let first = out.lines().next().unwrap();
        assert_eq!(first, "DuckDuckGo Lite\thttps://lite.duckduckgo.com/lite?q=cats");
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn test_urls_joins_words() {
        let mut dashboard = Dashboard::open(MemoryStore::new());
        let out = exec(
            &mut dashboard,
            Command::Urls {
                profile: Some("p3".to_string()),
                query: vec!["big".to_string(), "cats".to_string()],
            },
        )
        .unwrap();
        assert!(out.starts_with("Google\thttps://www.google.com/search?q=big%20cats\n"));
    }

    #[test]
    fn test_unknown_profile_is_an_error() {
        let mut dashboard = Dashboard::open(MemoryStore::new());
        let result = exec(
            &mut dashboard,
            Command::Select {
                profile_id: "nope".to_string(),
            },
        );
        assert!(result.is_err());
        assert_eq!(dashboard.store().selected_profile_id(), "p1");
    }

    #[test]
    fn test_add_engine_with_name() {
        let mut dashboard = Dashboard::open(MemoryStore::new());
        let out = exec(
            &mut dashboard,
            Command::AddEngine {
                profile_id: "p2".to_string(),
                name: Some("Kagi".to_string()),
                template: Some("https://kagi.com/search?q={q}".to_string()),
            },
        )
        .unwrap();

        let engine_id = out.trim();
        let engine = dashboard.store().profile("p2").unwrap().engine(engine_id).unwrap();
        assert_eq!(engine.name, "Kagi");
        assert_eq!(engine.url_template, "https://kagi.com/search?q={q}");
    }

    #[test]
    fn test_resize_clamps() {
        let mut dashboard = Dashboard::open(MemoryStore::new());
        exec(
            &mut dashboard,
            Command::Resize {
                profile_id: "p1".to_string(),
                min_width: Some(50.0),
                min_height: None,
            },
        )
        .unwrap();
        assert_eq!(dashboard.sizing().min_width, 100.0);
    }

    #[test]
    fn test_export_import_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut source = Dashboard::open(MemoryStore::new());
        exec(
            &mut source,
            Command::RenameProfile {
                profile_id: "p1".to_string(),
                name: "Everything".to_string(),
            },
        )
        .unwrap();
        exec(
            &mut source,
            Command::Export {
                output: Some(path.clone()),
            },
        )
        .unwrap();

        let mut target = Dashboard::open(MemoryStore::new());
        let out = exec(&mut target, Command::Import { path }).unwrap();
        assert_eq!(out, "imported 3 profiles, selected p1\n");
        assert_eq!(target.store(), source.store());
    }

    #[test]
    fn test_import_rejects_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, r#"{"profiles": [{"id": 1}], "version": 1}"#).unwrap();

        let mut dashboard = Dashboard::open(MemoryStore::new());
        let mut out = Vec::new();
        let result = run(&mut dashboard, Command::Import { path }, &mut out);

        assert!(result.is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "dropped profile #0: missing string id\n");
        assert_eq!(dashboard.store().profiles().len(), 3);
    }
}
