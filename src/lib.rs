/// Submission Desk - Chrome Extension for collecting form submissions
/// Built with Rust + WASM + Yew

mod chrome;
pub mod config;
pub mod confirmation;
pub mod dashboard;
pub mod form;
pub mod session;
pub mod storage;
pub mod submission;
pub mod ui;
pub mod validation;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the email check for JavaScript access
#[wasm_bindgen]
pub fn validate_email(email: &str) -> bool {
    validation::is_valid_email(email.trim())
}

// Start the Yew app for the popup form
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::SubmissionPopup>::new().render();
}

// Start the Yew app for the dashboard page
#[wasm_bindgen]
pub fn start_dashboard() {
    yew::Renderer::<ui::dashboard::DashboardView>::new().render();
}
