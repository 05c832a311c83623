/// Why a confirm was refused.
///
/// The field stays usable after any of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    /// Range mode was confirmed without both a start and an end date.
    #[error("incomplete range selection (start set: {start_set}, end set: {end_set})")]
    IncompleteRangeSelection { start_set: bool, end_set: bool },
}

/// A message box the field shows on top of everything else until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<PickerError> for Alert {
    fn from(err: PickerError) -> Self {
        match err {
            PickerError::IncompleteRangeSelection { .. } => {
                Self::new("Error", "Please select a valid date")
            }
        }
    }
}

/// What to do with a [`PickerError`].
#[derive(Default)]
pub enum ErrorHandler {
    /// Show an [`Alert`] (the default).
    #[default]
    Alert,

    /// Hand the error to the caller instead.
    Callback(Box<dyn FnMut(PickerError)>),
}

impl std::fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alert => f.write_str("Alert"),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}
