use crate::api::RideLinkApi;
use crate::components::icons::{Car, MagnifyingGlass, MapPin, Moon, Sun};
use crate::theme;
use leptos::prelude::*;
use leptos::task::spawn_local;
use ridelink_shared::{DEFAULT_PLACE_RADIUS, PlaceDetails, PlacePrediction};
use std::rc::Rc;

#[component]
pub fn HomePage() -> impl IntoView {
    // API 客户端只是 base_url 的轻量包装，按值克隆进各个闭包
    let api = (**use_context::<send_wrapper::SendWrapper<Rc<RideLinkApi>>>()
        .expect("RideLinkApi not found in context"))
    .clone();

    let (query, set_query) = signal(String::new());
    let (predictions, set_predictions) = signal(Vec::<PlacePrediction>::new());
    let (selected, set_selected) = signal(Option::<PlaceDetails>::None);
    let (is_searching, set_is_searching) = signal(false);
    let (is_dark, set_is_dark) = signal(theme::is_dark());

    let on_input = {
        let api = api.clone();
        move |ev| {
            let text = event_target_value(&ev);
            set_query.set(text.clone());
            set_selected.set(None);

            let api = api.clone();
            set_is_searching.set(true);
            spawn_local(async move {
                match api
                    .place_autocomplete(&text, None, DEFAULT_PLACE_RADIUS)
                    .await
                {
                    Ok(list) => set_predictions.set(list),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("[Home] Place search failed: {}", e).into(),
                        );
                    }
                }
                set_is_searching.set(false);
            });
        }
    };

    let select_place = {
        let api = api.clone();
        move |place_id: String| {
            let api = api.clone();
            spawn_local(async move {
                match api.place_details(&place_id).await {
                    Ok(details) => {
                        set_selected.set(details);
                        set_predictions.set(Vec::new());
                    }
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("[Home] Place details failed: {}", e).into(),
                        );
                    }
                }
            });
        }
    };

    let toggle_theme = move |_| {
        let next = !is_dark.get();
        theme::set_theme(next);
        set_is_dark.set(next);
    };

    view! {
        <div class="min-h-screen bg-base-200">
            // 顶栏
            <div class="navbar bg-base-100 shadow-sm">
                <div class="flex-1 gap-2 px-2">
                    <span class="text-primary"><Car attr:class="h-6 w-6" /></span>
                    <span class="text-xl font-bold">"RideLink"</span>
                </div>
                <div class="flex-none">
                    <button class="btn btn-ghost btn-circle" on:click=toggle_theme>
                        {move || if is_dark.get() {
                            view! { <Sun attr:class="h-5 w-5" /> }.into_any()
                        } else {
                            view! { <Moon attr:class="h-5 w-5" /> }.into_any()
                        }}
                    </button>
                </div>
            </div>

            <div class="p-4 max-w-md mx-auto">
                // 目的地搜索
                <div class="card bg-base-100 shadow">
                    <div class="card-body p-4">
                        <label class="input input-bordered flex items-center gap-2">
                            <MagnifyingGlass attr:class="h-5 w-5 opacity-60" />
                            <input
                                type="text"
                                class="grow"
                                placeholder="Where to?"
                                on:input=on_input
                                prop:value=query
                            />
                            <Show when=move || is_searching.get()>
                                <span class="loading loading-spinner loading-xs"></span>
                            </Show>
                        </label>

                        <ul class="menu p-0">
                            {move || predictions.get().into_iter().map(|p| {
                                let place_id = p.place_id.clone();
                                let main = p.structured_formatting.main_text.clone();
                                let secondary = p.structured_formatting.secondary_text.clone();
                                let select_place = select_place.clone();
                                view! {
                                    <li>
                                        <button on:click=move |_| select_place(place_id.clone())>
                                            <MapPin attr:class="h-4 w-4 opacity-60" />
                                            <div class="flex flex-col items-start">
                                                <span>{main}</span>
                                                <span class="text-xs opacity-60">{secondary}</span>
                                            </div>
                                        </button>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </div>
                </div>

                // 已选目的地
                {move || selected.get().map(|place| view! {
                    <div class="card bg-base-100 shadow mt-4">
                        <div class="card-body p-4">
                            <h2 class="card-title text-base">{place.name.clone()}</h2>
                            <p class="text-sm opacity-70">{place.formatted_address.clone()}</p>
                            <p class="text-xs opacity-50">
                                {format!("{:.5}, {:.5}", place.geometry.location.lat, place.geometry.location.lng)}
                            </p>
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}
