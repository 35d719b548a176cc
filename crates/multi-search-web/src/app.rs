use std::rc::Rc;

use multi_search_core::{Action, Dashboard, EXPORT_FILE_NAME};
use serde_json::Value;
use tracing::warn;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::about::AboutModal;
use crate::components::button::{Button, ButtonKind};
use crate::components::frames_grid::FramesGrid;
use crate::components::settings::SettingsModal;
use crate::download::offer_download;
use crate::storage::BrowserStorage;

pub enum Msg {
    Store(Action),
    /// Add an engine to the given profile
    AddEngine(String),
    /// A parsed configuration document picked by the user
    Import(Value),
}

pub struct DashboardState {
    dashboard: Dashboard<BrowserStorage>,
}

impl DashboardState {
    fn open() -> Self {
        Self {
            dashboard: Dashboard::open(BrowserStorage),
        }
    }
}

impl Reducible for DashboardState {
    type Action = Msg;

    fn reduce(self: Rc<Self>, msg: Msg) -> Rc<Self> {
        let mut dashboard = self.dashboard.clone();
        let changed = match msg {
            Msg::Store(action) => dashboard.dispatch(action),
            Msg::AddEngine(profile_id) => dashboard.add_engine(&profile_id).is_some(),
            Msg::Import(value) => dashboard.import_value(&value).is_accepted(),
        };

        if changed {
            Rc::new(Self { dashboard })
        } else {
            self
        }
    }
}

#[function_component]
pub fn App() -> Html {
    let state = use_reducer(DashboardState::open);
    let query = use_state(String::new);
    let submitted = use_state(String::new);
    let show_settings = use_state(|| false);
    let show_about = use_state(|| false);

    let dashboard = &state.dashboard;
    let store = dashboard.store();
    let selected_id = store
        .selected_profile()
        .map(|p| p.id.clone())
        .unwrap_or_default();
    let sizing = dashboard.sizing();
    let on_action = {
        let dispatcher = state.dispatcher();
        Callback::from(move |msg: Msg| dispatcher.dispatch(msg))
    };

    let onsubmit = {
        let query = query.clone();
        let submitted = submitted.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submitted.set(query.trim().to_string());
        })
    };
    let oninput = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            query.set(e.target_unchecked_into::<HtmlInputElement>().value())
        })
    };
    let on_remove = {
        let on_action = on_action.clone();
        let profile_id = selected_id.clone();
        Callback::from(move |engine_id: String| {
            on_action.emit(Msg::Store(Action::RemoveEngine {
                profile_id: profile_id.clone(),
                engine_id,
            }))
        })
    };
    let on_export = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let result = state
                .dashboard
                .export_json()
                .map_err(|e| e.to_string())
                .and_then(|json| {
                    offer_download(EXPORT_FILE_NAME, &json).map_err(|e| format!("{:?}", e))
                });
            if let Err(e) = result {
                warn!("Export failed: {}", e);
            }
        })
    };
    let toggle = |flag: &UseStateHandle<bool>, value: bool| {
        let flag = flag.clone();
        Callback::from(move |_: ()| flag.set(value))
    };
    let clicked = |cb: Callback<()>| cb.reform(|_: MouseEvent| ());

    html! {
        <main class="app">
            <form class="toolbar" {onsubmit}>
                <div class="profiles" role="radiogroup" aria-label="Profile">
                    { for store.profiles().iter().map(|profile| {
                        let onchange = {
                            let on_action = on_action.clone();
                            let profile_id = profile.id.clone();
                            Callback::from(move |_: Event| {
                                on_action.emit(Msg::Store(Action::SelectProfile {
                                    profile_id: profile_id.clone(),
                                }))
                            })
                        };
                        html! {
                            <label key={ profile.id.clone() } class="profile">
                                <input
                                    type="radio"
                                    name="profile"
                                    value={ profile.id.clone() }
                                    checked={ profile.id == selected_id }
                                    {onchange}/>
                                { profile.name.clone() }
                            </label>
                        }
                    }) }
                </div>
                <input
                    type="text"
                    class="input query"
                    placeholder="Search…"
                    aria-label="Search query"
                    value={ (*query).clone() }
                    {oninput}/>
                <Button text="Search" kind={ ButtonKind::Primary } submit={ true }/>
                <Button text="Settings" title="Edit search engines" onclick={ clicked(toggle(&show_settings, true)) }/>
                <Button text="About" onclick={ clicked(toggle(&show_about, true)) }/>
            </form>

            <FramesGrid
                frames={ dashboard.frames(&submitted) }
                min_width={ sizing.min_width }
                min_height={ sizing.min_height }
                {on_remove}/>

            if *show_settings {
                <SettingsModal
                    profiles={ store.profiles().to_vec() }
                    initial_profile_id={ selected_id.clone() }
                    on_action={ on_action.clone() }
                    {on_export}
                    on_close={ toggle(&show_settings, false) }/>
            }
            if *show_about {
                <AboutModal on_close={ toggle(&show_about, false) }/>
            }
        </main>
    }
}
