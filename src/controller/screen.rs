use serde::Serialize;
use std::fmt;

/// Screen currently shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Registration form
    Login,
    /// Stored users
    List,
    /// Edit form for one record
    Edit,
}

/// Navigation requests understood by the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    ShowLogin,
    GoToList,
    EditPressed,
    BackPressed,
    UpdateSubmitted,
}

impl Navigation {
    pub fn name(self) -> &'static str {
        match self {
            Navigation::ShowLogin => "show_login",
            Navigation::GoToList => "go_to_list",
            Navigation::EditPressed => "edit_pressed",
            Navigation::BackPressed => "back_pressed",
            Navigation::UpdateSubmitted => "submit_update",
        }
    }
}

impl Screen {
    /// Destination of `nav` from this screen, if the move is allowed
    ///
    /// Back-navigation is a fixed mapping; there is no history stack.
    pub fn next(self, nav: Navigation) -> Option<Screen> {
        match (self, nav) {
            (Screen::List, Navigation::ShowLogin) => Some(Screen::Login),
            (Screen::Login, Navigation::GoToList) => Some(Screen::List),
            (Screen::List, Navigation::EditPressed) => Some(Screen::Edit),
            (Screen::Edit, Navigation::BackPressed) => Some(Screen::List),
            (Screen::Edit, Navigation::UpdateSubmitted) => Some(Screen::List),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Login => "login",
            Screen::List => "list",
            Screen::Edit => "edit",
        };
        f.write_str(name)
    }
}
