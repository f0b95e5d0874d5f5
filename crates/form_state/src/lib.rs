mod dom;
mod options;
mod seed;
mod store;

pub use dom::{ControlType, control_type, normalize_textarea_newlines};
pub use options::{option_label, option_value, options_of, select_by_value, selected_option};
pub use seed::seed_form_state_from_dom;
pub use store::FormStateStore;

#[cfg(test)]
mod tests;
