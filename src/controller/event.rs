use serde::Deserialize;

/// Something the user did on screen
///
/// Indices refer to positions in the currently displayed list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreenEvent {
    ShowLogin,
    GoToList,
    Refresh,
    EditPressed { index: usize },
    BackPressed,
    SetEmail { value: String },
    SetPassword { value: String },
    SubmitRegistration,
    SubmitUpdate,
    Delete { index: usize },
}
