/// Dashboard page: lists stored submissions with selection and delete

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::chrome::ChromeStorage;
use crate::config::Config;
use crate::confirmation::DeleteTarget;
use crate::dashboard::Dashboard;
use crate::session::Session;
use crate::storage::SubmissionStore;
use crate::submission::{display_or_placeholder, format_timestamp};
use crate::ui::components::ConfirmDialog;

#[function_component(DashboardView)]
pub fn dashboard_view() -> Html {
    let config = Config::default();
    let session = (*use_state(|| Session::new(Dashboard::new()))).clone();
    let trigger = use_force_update();

    // Fresh read from storage
    let on_reload = {
        let session = session.clone();
        let trigger = trigger.clone();
        let config = config.clone();

        Callback::from(move |_: ()| {
            let session = session.clone();
            let trigger = trigger.clone();
            let config = config.clone();
            spawn_local(async move {
                let store = SubmissionStore::new(ChromeStorage, &config);
                // Failures are shown on the page
                let _ = session.load(&store, move || trigger.force_update()).await;
            });
        })
    };

    // Load on mount
    {
        let on_reload = on_reload.clone();
        use_effect_with((), move |_| {
            on_reload.emit(());
            || ()
        });
    }

    let on_toggle = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |index: usize| {
            session.update(|dashboard| dashboard.toggle(index));
            trigger.force_update();
        })
    };

    let on_select_all = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |_: MouseEvent| {
            session.update(|dashboard| dashboard.select_all());
            trigger.force_update();
        })
    };

    let on_request = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |target: DeleteTarget| {
            session.update(|dashboard| dashboard.request_delete(target).is_some());
            trigger.force_update();
        })
    };

    let on_cancel = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |_: ()| {
            session.update(|dashboard| dashboard.cancel());
            trigger.force_update();
        })
    };

    // Confirmed delete: written only if the session accepts it, committed on acknowledgment
    let on_confirm = {
        let session = session.clone();
        let trigger = trigger.clone();

        Callback::from(move |_: ()| {
            let session = session.clone();
            let trigger = trigger.clone();
            let config = config.clone();
            spawn_local(async move {
                let store = SubmissionStore::new(ChromeStorage, &config);
                let _ = session.confirm(&store, move || trigger.force_update()).await;
            });
        })
    };

    let dashboard = session.state();
    let submissions = dashboard.submissions();
    let selected_count = dashboard.selection().len();
    let is_busy = dashboard.is_busy();

    html! {
        <div class="container">
            <div class="card">
                <div class="header-row">
                    <div>
                        <h1 class="main-title">{"📊 Extension Dashboard"}</h1>
                        <p class="subtitle">{dashboard.summary()}</p>
                    </div>
                    <div class="actions">
                        <Button
                            onclick={on_reload.reform(|_| ())}
                            disabled={is_busy}
                            variant={ButtonVariant::Secondary}
                        >
                            {"🔄 Reload"}
                        </Button>
                        if !submissions.is_empty() {
                            <Button
                                onclick={on_select_all}
                                disabled={is_busy}
                                variant={ButtonVariant::Secondary}
                            >
                                {if dashboard.all_selected() { "Deselect All" } else { "Select All" }}
                            </Button>
                        }
                        if selected_count > 0 {
                            <Button
                                onclick={on_request.reform(|_| DeleteTarget::Selected)}
                                disabled={is_busy}
                                variant={ButtonVariant::Danger}
                            >
                                {format!("Delete Selected ({})", selected_count)}
                            </Button>
                        }
                    </div>
                </div>

                if let Some(error) = dashboard.error() {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {error.to_string()}
                    </Alert>
                }

                if !dashboard.is_loaded() {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading submissions..."}</p>
                    </div>
                } else if submissions.is_empty() {
                    <div class="empty-state">
                        <p>{"No submissions yet."}</p>
                    </div>
                } else {
                    <div class="table-wrapper">
                        <table>
                            <thead>
                                <tr>
                                    <th class="checkbox-header"></th>
                                    <th>{"#"}</th>
                                    <th>{"Name"}</th>
                                    <th>{"Email"}</th>
                                    <th>{"Message"}</th>
                                    <th>{"Date"}</th>
                                    <th>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for submissions.iter().enumerate().map(|(index, submission)| {
                                    let selected = dashboard.is_selected(index);

                                    html! {
                                        <tr key={format!("{}:{}", index, submission.id)} class={if selected { "selected" } else { "" }}>
                                            <td>
                                                <input
                                                    type="checkbox"
                                                    class="checkbox"
                                                    checked={selected}
                                                    disabled={is_busy}
                                                    onchange={on_toggle.reform(move |_| index)}
                                                />
                                            </td>
                                            <td>{index + 1}</td>
                                            <td>{display_or_placeholder(&submission.name)}</td>
                                            <td>{display_or_placeholder(&submission.email)}</td>
                                            <td>
                                                <div class="message-cell" title={submission.message.clone()}>
                                                    {display_or_placeholder(&submission.message)}
                                                </div>
                                            </td>
                                            <td>{format_timestamp(&submission.timestamp)}</td>
                                            <td>
                                                <Button
                                                    onclick={on_request.reform(move |_| DeleteTarget::One(index))}
                                                    disabled={is_busy}
                                                    variant={ButtonVariant::Danger}
                                                >
                                                    {"🗑️ Delete"}
                                                </Button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            </div>

            if let Some(confirmation) = dashboard.pending() {
                <ConfirmDialog
                    confirmation={confirmation.clone()}
                    on_confirm={on_confirm}
                    on_cancel={on_cancel}
                />
            }
        </div>
    }
}
