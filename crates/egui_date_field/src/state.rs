//! The field's state machine, independent of any `Ui`.
//!
//! ```text
//! Closed --Open--> Open --SelectionChanged--> Open (selection updated)
//!                  Open --Confirm ok--------> Closed (label updated)
//!                  Open --Confirm err-------> Open (unchanged)
//! ```
//!
//! [`update`] is pure: it returns the next [`FieldState`] and what the caller should be told,
//! and never calls back into anything itself.

use chrono::NaiveDate;

use crate::{FormatConfig, PickerError, PickerMode};

/// Which endpoint the next click on the calendar sets, in range mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusedEnd {
    #[default]
    Start,
    End,
}

/// What the calendar reports back to the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The current-date pointer moved. Carries no start/end and commits nothing.
    PointerMoved(NaiveDate),

    /// The range endpoints changed.
    RangeChanged {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,

        /// The endpoint the next click will set.
        focused: FocusedEnd,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionState {
    pub mode: PickerMode,

    /// The current-date pointer. This is what single mode confirms.
    pub single_date: NaiveDate,

    pub range_start: Option<NaiveDate>,
    pub range_end: Option<NaiveDate>,
    pub focused_end: FocusedEnd,
}

impl SelectionState {
    pub fn new(mode: PickerMode, today: NaiveDate) -> Self {
        Self {
            mode,
            single_date: today,
            range_start: None,
            range_end: None,
            focused_end: FocusedEnd::Start,
        }
    }
}

/// What the field shows. Derived from confirms, never read back as a source of truth.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub modal_open: bool,

    /// `true` once something was confirmed; until then the placeholder is shown.
    pub has_selection: bool,

    pub formatted_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldState {
    pub selection: SelectionState,
    pub display: DisplayState,
}

impl FieldState {
    /// Closed, nothing selected, pointer on `today`.
    pub fn new(mode: PickerMode, today: NaiveDate) -> Self {
        Self {
            selection: SelectionState::new(mode, today),
            display: DisplayState::default(),
        }
    }
}

/// Input to [`update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Msg {
    Open,
    Close,
    SelectionChanged(SelectionEvent),
    Confirm,
}

/// What a successful confirm hands to the caller, formatted with the return format.
///
/// With the `serde` feature this serializes to `{"date": ..}` or `{"startDate": .., "endDate": ..}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ConfirmPayload {
    Single {
        date: String,
    },
    Range {
        #[cfg_attr(feature = "serde", serde(rename = "startDate"))]
        start_date: String,

        #[cfg_attr(feature = "serde", serde(rename = "endDate"))]
        end_date: String,
    },
}

/// Something the owner of the state has to pass on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Confirmed(ConfirmPayload),
    Failed(PickerError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: FieldState,
    pub effect: Option<Effect>,
}

/// Compute the state after `msg`.
pub fn update(state: &FieldState, formats: &FormatConfig, msg: Msg) -> Transition {
    let mut next = state.clone();
    let mut effect = None;

    match msg {
        Msg::Open => next.display.modal_open = true,
        Msg::Close => next.display.modal_open = false,
        Msg::SelectionChanged(SelectionEvent::PointerMoved(date)) => {
            next.selection.single_date = date;
        }
        Msg::SelectionChanged(SelectionEvent::RangeChanged {
            start,
            end,
            focused,
        }) => {
            next.selection.focused_end = focused;
            next.selection.range_start = start;
            next.selection.range_end = end;
        }
        Msg::Confirm => {
            let (confirmed, result) = confirm(state, formats);
            next = confirmed;
            effect = Some(match result {
                Ok(payload) => Effect::Confirmed(payload),
                Err(err) => Effect::Failed(err),
            });
        }
    }

    Transition {
        state: next,
        effect,
    }
}

/// The `Confirm` transition on its own.
///
/// On success the modal is closed and the label replaced; on failure the state is unchanged.
pub fn confirm(
    state: &FieldState,
    formats: &FormatConfig,
) -> (FieldState, Result<ConfirmPayload, PickerError>) {
    match label_and_payload(&state.selection, formats) {
        Ok((label, payload)) => {
            let next = FieldState {
                selection: state.selection,
                display: DisplayState {
                    modal_open: false,
                    has_selection: true,
                    formatted_label: label,
                },
            };
            (next, Ok(payload))
        }
        Err(err) => (state.clone(), Err(err)),
    }
}

/// The label and the payload of a confirm, or why there is none.
fn label_and_payload(
    selection: &SelectionState,
    formats: &FormatConfig,
) -> Result<(String, ConfirmPayload), PickerError> {
    match selection.mode {
        PickerMode::Single => {
            let date = selection.single_date;
            Ok((
                formats.display_format.format(date),
                ConfirmPayload::Single {
                    date: formats.return_format.format(date),
                },
            ))
        }
        PickerMode::Range => match (selection.range_start, selection.range_end) {
            (Some(start), Some(end)) => Ok((
                formats.range_label(start, end),
                ConfirmPayload::Range {
                    start_date: formats.return_format.format(start),
                    end_date: formats.return_format.format(end),
                },
            )),
            (start, end) => Err(PickerError::IncompleteRangeSelection {
                start_set: start.is_some(),
                end_set: end.is_some(),
            }),
        },
    }
}
