/// Popup UI: the submission form

use chrono::Utc;
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::chrome::{ChromeStorage, open_extension_page, sleep};
use crate::config::Config;
use crate::form::{Field, SubmissionForm};
use crate::session::Session;
use crate::storage::SubmissionStore;
use crate::ui::components::StatusLine;

#[function_component(SubmissionPopup)]
pub fn submission_popup() -> Html {
    let config = Config::default();
    let form = (*use_state(|| Session::new(SubmissionForm::new()))).clone();
    let trigger = use_force_update();

    // Submit handler
    let on_submit = {
        let form = form.clone();
        let trigger = trigger.clone();

        Callback::from(move |_: ()| {
            let form = form.clone();
            let trigger = trigger.clone();
            let config = config.clone();
            spawn_local(async move {
                let store = SubmissionStore::new(ChromeStorage, &config);
                let rerender = trigger.clone();
                let submitted = match form.submit(&store, &config, Utc::now(), move || rerender.force_update()).await {
                    Ok(submitted) => submitted,
                    // The form already shows the message
                    Err(_) => return,
                };

                {
                    let form = form.clone();
                    let trigger = trigger.clone();
                    let generation = submitted.status_generation;
                    let lifetime = submitted.hide_status_after;
                    spawn_local(async move {
                        sleep(lifetime).await;
                        form.update(|form| form.hide_success(generation));
                        trigger.force_update();
                    });
                }

                sleep(submitted.open_dashboard_after).await;
                if let Err(e) = open_extension_page(&config.dashboard_page).await {
                    log::error!("{}", e);
                }
            });
        })
    };

    // Enter in any field submits
    let on_keypress = {
        let on_submit = on_submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                on_submit.emit(());
            }
        })
    };

    let state = form.state();
    let is_busy = state.is_busy();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Send a Message"}</h1>

            <div class="flex-column-gap">
                <input
                    id="name"
                    type="text"
                    placeholder="Name"
                    value={state.name.clone()}
                    oninput={on_field_input(&form, &trigger, Field::Name)}
                    onkeypress={on_keypress.clone()}
                    disabled={is_busy}
                    class="form-input"
                />
                <input
                    id="email"
                    type="email"
                    placeholder="Email"
                    value={state.email.clone()}
                    oninput={on_field_input(&form, &trigger, Field::Email)}
                    onkeypress={on_keypress.clone()}
                    disabled={is_busy}
                    class="form-input"
                />
                <textarea
                    id="message"
                    placeholder="Message"
                    value={state.message.clone()}
                    oninput={on_field_input(&form, &trigger, Field::Message)}
                    onkeypress={on_keypress}
                    disabled={is_busy}
                    class="form-input"
                />

                <Button
                    onclick={on_submit.reform(|_| ())}
                    disabled={is_busy}
                    variant={ButtonVariant::Primary}
                    block={true}
                >
                    {if is_busy { "Submitting..." } else { "Submit" }}
                </Button>
            </div>

            <StatusLine status={state.status().clone()} />
        </div>
    }
}

fn on_field_input(form: &Session<SubmissionForm>, trigger: &UseForceUpdateHandle, field: Field) -> Callback<InputEvent> {
    let form = form.clone();
    let trigger = trigger.clone();
    Callback::from(move |e: InputEvent| {
        let value = if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
            area.value()
        } else {
            return;
        };
        form.update(|form| form.set_field(field, value));
        trigger.force_update();
    })
}
