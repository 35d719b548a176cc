use multi_search_core::{Action, EnginePatch, Profile, ProfilePatch};
use serde_json::Value;
use tracing::debug;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::app::Msg;
use crate::components::button::{Button, ButtonKind};

/// Numeric input as typed: leading digits, anything else counts as 0.
/// The store clamps the result.
fn parse_size(input: &str) -> f64 {
    let trimmed = input.trim();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<i64>().map(|n| n as f64).unwrap_or(0.0)
}

fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

/// Read the picked file and hand its JSON to the dashboard. Unreadable or
/// unparsable files are ignored.
fn import_file(input: HtmlInputElement, on_action: Callback<Msg>) {
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    let Some(file) = file else {
        return;
    };

    spawn_local(async move {
        let file = gloo_file::File::from(file);
        let text = match gloo_file::futures::read_as_text(&file).await {
            Ok(text) => text,
            Err(e) => {
                debug!("Failed to read import file: {}", e);
                return;
            }
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => on_action.emit(Msg::Import(value)),
            Err(e) => debug!("Import file is not JSON: {}", e),
        }
    });
}

#[derive(PartialEq, Properties)]
pub struct SettingsProps {
    pub profiles: Vec<Profile>,
    pub initial_profile_id: AttrValue,
    pub on_action: Callback<Msg>,
    pub on_export: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsProps) -> Html {
    let active_id = use_state(|| props.initial_profile_id.to_string());

    let Some(active) = props
        .profiles
        .iter()
        .find(|p| p.id == *active_id)
        .or_else(|| props.profiles.first())
    else {
        return html! {};
    };
    let profile_id = active.id.clone();

    let close = props.on_close.reform(|_: MouseEvent| ());
    let store = {
        let on_action = props.on_action.clone();
        move |action: Action| on_action.emit(Msg::Store(action))
    };

    let on_rename = {
        let store = store.clone();
        let profile_id = profile_id.clone();
        Callback::from(move |e: InputEvent| {
            store(Action::RenameProfile {
                profile_id: profile_id.clone(),
                name: input_value(e),
            })
        })
    };
    let on_size = |to_patch: fn(f64) -> ProfilePatch| {
        let store = store.clone();
        let profile_id = profile_id.clone();
        Callback::from(move |e: InputEvent| {
            store(Action::UpdateProfile {
                profile_id: profile_id.clone(),
                patch: to_patch(parse_size(&input_value(e))),
            })
        })
    };
    let on_import = {
        let on_action = props.on_action.clone();
        Callback::from(move |e: Event| import_file(e.target_unchecked_into(), on_action.clone()))
    };
    let on_add = {
        let on_action = props.on_action.clone();
        let profile_id = profile_id.clone();
        Callback::from(move |_: MouseEvent| on_action.emit(Msg::AddEngine(profile_id.clone())))
    };

    html! {
        <div class="backdrop" onclick={ close.clone() }>
            <div class="modal wide" onclick={ Callback::from(|e: MouseEvent| e.stop_propagation()) }>
                <div class="modal-header">
                    <h2>{ "Search Engines" }</h2>
                    <div class="row">
                        <Button text="Export" onclick={ props.on_export.reform(|_: MouseEvent| ()) }/>
                        <label class="button">
                            { "Import" }
                            <input
                                type="file"
                                accept="application/json,.json"
                                class="hidden"
                                onchange={ on_import }/>
                        </label>
                        <Button text="Close" title="Close settings" onclick={ close }/>
                    </div>
                </div>
                <div class="tabs">
                    { for props.profiles.iter().map(|p| {
                        let id = p.id.clone();
                        let active_id = active_id.clone();
                        let pressed = p.id == profile_id;
                        html! {
                            <button
                                type="button"
                                key={ p.id.clone() }
                                class={ classes!("tab", pressed.then_some("active")) }
                                aria-pressed={ pressed.to_string() }
                                onclick={ Callback::from(move |_: MouseEvent| active_id.set(id.clone())) }>
                                { p.name.clone() }
                            </button>
                        }
                    }) }
                </div>
                <div class="modal-body">
                    <div class="row">
                        <label>{ "Profile name" }</label>
                        <input class="input" value={ active.name.clone() } oninput={ on_rename }/>
                    </div>
                    <div class="row">
                        <label>
                            { "Min width" }
                            <input
                                type="number"
                                min="100"
                                class="input narrow"
                                value={ active.effective_min_width().to_string() }
                                oninput={ on_size(ProfilePatch::min_width) }/>
                        </label>
                        <label>
                            { "Min height" }
                            <input
                                type="number"
                                min="100"
                                class="input narrow"
                                value={ active.effective_min_height().to_string() }
                                oninput={ on_size(ProfilePatch::min_height) }/>
                        </label>
                    </div>
                    { for active.engines.iter().map(|engine| {
                        let on_patch = |to_patch: fn(String) -> EnginePatch| {
                            let store = store.clone();
                            let profile_id = profile_id.clone();
                            let engine_id = engine.id.clone();
                            Callback::from(move |e: InputEvent| {
                                store(Action::UpdateEngine {
                                    profile_id: profile_id.clone(),
                                    engine_id: engine_id.clone(),
                                    patch: to_patch(input_value(e)),
                                })
                            })
                        };
                        let on_delete = {
                            let store = store.clone();
                            let profile_id = profile_id.clone();
                            let engine_id = engine.id.clone();
                            Callback::from(move |_: MouseEvent| {
                                store(Action::RemoveEngine {
                                    profile_id: profile_id.clone(),
                                    engine_id: engine_id.clone(),
                                })
                            })
                        };
                        html! {
                            <div class="engine" key={ engine.id.clone() }>
                                <div class="row">
                                    <label>{ "Name" }</label>
                                    <input
                                        class="input"
                                        value={ engine.name.clone() }
                                        oninput={ on_patch(EnginePatch::name) }/>
                                </div>
                                <div class="row">
                                    <label>{ "URL" }</label>
                                    <input
                                        class="input"
                                        value={ engine.url_template.clone() }
                                        placeholder="Use {q} for the query"
                                        oninput={ on_patch(EnginePatch::url_template) }/>
                                </div>
                                <div class="row end">
                                    <Button text="Delete" kind={ ButtonKind::Danger } onclick={ on_delete }/>
                                </div>
                            </div>
                        }
                    }) }
                    <Button text="Add engine" onclick={ on_add }/>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("640"), 640.0);
        assert_eq!(parse_size(" 320px"), 320.0);
        assert_eq!(parse_size(""), 0.0);
        assert_eq!(parse_size("abc"), 0.0);
        assert_eq!(parse_size("-5"), -5.0);
    }
}
