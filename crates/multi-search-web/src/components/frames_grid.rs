use gloo_events::EventListener;
use multi_search_core::{compute_tile_height, Frame, TileLayout};
use web_sys::Element;
use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct FramesGridProps {
    pub frames: Vec<Frame>,
    pub min_width: f64,
    pub min_height: f64,
    /// Called with the engine id
    pub on_remove: Callback<String>,
}

/// Everything that can move tiles between rows
fn layout_key(props: &FramesGridProps) -> (usize, f64, f64) {
    (props.frames.len(), props.min_width, props.min_height)
}

/// Read tile positions from the rendered grid
fn measure(grid: &Element) -> TileLayout {
    let tiles = grid.children();
    let tile_tops = (0..tiles.length())
        .filter_map(|i| tiles.item(i))
        .map(|tile| tile.get_bounding_client_rect().top())
        .collect();

    let header_height = grid
        .query_selector(".tile-header")
        .ok()
        .flatten()
        .map(|header| header.get_bounding_client_rect().height())
        .unwrap_or_default();

    let viewport_height = web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or_default();

    TileLayout {
        tile_tops,
        grid_top: grid.get_bounding_client_rect().top(),
        viewport_height,
        header_height,
    }
}

#[function_component]
pub fn FramesGrid(props: &FramesGridProps) -> Html {
    let grid_ref = use_node_ref();
    let tile_height = use_state(|| props.min_height);

    {
        let grid_ref = grid_ref.clone();
        let tile_height = tile_height.clone();
        use_effect_with(layout_key(props), move |&(_, _, min_height)| {
            let resize = move || {
                if let Some(grid) = grid_ref.cast::<Element>() {
                    tile_height.set(compute_tile_height(&measure(&grid), min_height));
                }
            };
            resize();

            let listener = web_sys::window()
                .map(|window| EventListener::new(&window, "resize", move |_| resize()));
            move || drop(listener)
        });
    }

    let tile_style = format!(
        "flex: 1 1 {}px; min-width: {}px",
        props.min_width, props.min_width
    );
    let frame_style = format!("height: {}px", *tile_height);

    html! {
        <div class="grid" ref={ grid_ref }>
            { for props.frames.iter().map(|frame| {
                let on_remove = {
                    let engine_id = frame.engine_id.clone();
                    props.on_remove.reform(move |_: MouseEvent| engine_id.clone())
                };
                html! {
                    <div class="tile" key={ frame.engine_id.clone() } style={ tile_style.clone() }>
                        <div class="tile-header">
                            <a
                                href={ frame.url.clone() }
                                target="_blank"
                                rel="noreferrer noopener"
                                title="Open in new tab">
                                { frame.name.clone() }
                            </a>
                            <button
                                type="button"
                                class="remove"
                                aria-label={ format!("Remove {}", frame.name) }
                                onclick={ on_remove }>
                                { "Remove" }
                            </button>
                        </div>
                        <iframe
                            title={ frame.name.clone() }
                            src={ frame.url.clone() }
                            class="frame"
                            style={ frame_style.clone() }/>
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(min_width: f64, min_height: f64) -> FramesGridProps {
        FramesGridProps {
            frames: Vec::new(),
            min_width,
            min_height,
            on_remove: Callback::noop(),
        }
    }

    #[test]
    fn test_layout_key_tracks_min_width() {
        assert_eq!(layout_key(&props(500.0, 500.0)), layout_key(&props(500.0, 500.0)));
        assert_ne!(layout_key(&props(500.0, 500.0)), layout_key(&props(300.0, 500.0)));
        assert_ne!(layout_key(&props(500.0, 500.0)), layout_key(&props(500.0, 300.0)));
    }
}
