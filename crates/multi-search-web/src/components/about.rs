use yew::prelude::*;

use crate::components::button::Button;

const CHROME_EXTENSION: &str =
    "https://chromewebstore.google.com/detail/ignore-x-frame-headers/ohgdnhkppgeemnmjebhedjneajcedppf";
const FIREFOX_EXTENSION: &str =
    "https://addons.mozilla.org/firefox/addon/ignore-x-frame-options-header/";

#[derive(PartialEq, Properties)]
pub struct AboutProps {
    pub on_close: Callback<()>,
}

#[function_component]
pub fn AboutModal(props: &AboutProps) -> Html {
    let close = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="backdrop" onclick={ close.clone() }>
            <div class="modal" onclick={ Callback::from(|e: MouseEvent| e.stop_propagation()) }>
                <div class="modal-header">
                    <h2>{ "About" }</h2>
                    <Button text="Close" onclick={ close }/>
                </div>
                <div class="modal-body">
                    <p>
                        { "Many search engines block embedding via iframes. To view results here, \
                           install a browser extension that ignores X-Frame headers:" }
                    </p>
                    <ul>
                        <li>
                            <a href={ CHROME_EXTENSION } target="_blank" rel="noreferrer noopener">
                                { "Chrome: Ignore X-Frame headers" }
                            </a>
                        </li>
                        <li>
                            <a href={ FIREFOX_EXTENSION } target="_blank" rel="noreferrer noopener">
                                { "Firefox: Ignore X-Frame-Options Header" }
                            </a>
                        </li>
                    </ul>
                </div>
            </div>
        </div>
    }
}
