//! Enumerations for TUI state management.

/// Screen the application is currently showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    /// Both sections, list navigation.
    Board,
    /// Typing into the new-task input.
    Compose,
    /// Editing the text of the highlighted task in place.
    InlineEdit,
    /// One selected task expanded with title, memo and image.
    Focus,
    /// Asking for the path of an image to attach.
    AttachPrompt,
    /// Blocking notification; any key dismisses it.
    Alert,
    Help,
}

/// Which field of the focus view receives typing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FocusField {
    Title,
    Memo,
}

impl FocusField {
    pub fn next(self) -> Self {
        match self {
            FocusField::Title => FocusField::Memo,
            FocusField::Memo => FocusField::Title,
        }
    }
}
