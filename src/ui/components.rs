/// Reusable UI components

use crate::confirmation::Confirmation;
use crate::form::FormStatus;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusLineProps {
    pub status: FormStatus,
}

/// Inline success or error message under the form
#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    match &props.status {
        FormStatus::Hidden => html! {},
        FormStatus::Success(msg) => html! {
            <div class="status-line success-animation">
                <Alert r#type={AlertType::Success} title={msg.clone()} inline={true}>
                </Alert>
            </div>
        },
        FormStatus::Error(msg) => html! {
            <div class="status-line success-animation">
                <Alert r#type={AlertType::Danger} title={msg.clone()} inline={true}>
                </Alert>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub confirmation: Confirmation,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Modal in front of deletes; clicking the backdrop counts as cancel
#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let confirmation = &props.confirmation;

    let on_backdrop = props.on_cancel.reform(|_: MouseEvent| ());
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-overlay" onclick={on_backdrop}>
            <div class="modal-content" onclick={keep_open}>
                <h3 class="modal-title">{confirmation.title()}</h3>
                <p class="modal-text">{confirmation.message()}</p>
                <p class="warning-text">{Confirmation::WARNING}</p>
                <div class="modal-actions">
                    <Button
                        onclick={props.on_cancel.reform(|_| ())}
                        variant={ButtonVariant::Secondary}
                    >
                        {"Cancel"}
                    </Button>
                    <Button
                        onclick={props.on_confirm.reform(|_| ())}
                        variant={ButtonVariant::Danger}
                    >
                        {"Delete"}
                    </Button>
                </div>
            </div>
        </div>
    }
}
