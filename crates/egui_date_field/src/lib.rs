//! A date picker field for [`egui`](https://github.com/emilk/egui).
//!
//! [`DatePickerField`] shows the picked date (or a placeholder). Clicking it opens a modal
//! with a calendar and a confirm button; confirming formats the selection, closes the modal
//! and calls your `on_confirm` callback with a [`ConfirmPayload`]:
//!
//! * single mode: `{ date }`
//! * range mode: `{ startDate, endDate }`, refused with [`PickerError::IncompleteRangeSelection`]
//!   until both ends are picked
//!
//! Dates are formatted with moment.js-style patterns, see [`DateFormat`].
//! The label defaults to `"LL"` (`January 10, 2024`), the payload to `"YYYY/MM/DD"` (`2024/01/10`).
//!
//! The calendar is pluggable through [`DateRangeCollaborator`]; [`MonthCalendar`] is used by default.
//! The state machine behind the widget is in [`state`] and can be driven without a `Ui`.
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

#![forbid(unsafe_code)]

mod calendar;
mod config;
mod error;
mod field;
mod format;
pub mod state;
mod widget;

pub use crate::{
    calendar::{CalendarProps, DateRangeCollaborator, MonthCalendar, next_range, select_day},
    config::{
        BlockRule, DEFAULT_BUTTON_TEXT, DEFAULT_DISPLAY_FORMAT, DEFAULT_HEAD_FORMAT,
        DEFAULT_RANGE_SEPARATOR, DEFAULT_RETURN_FORMAT, FieldConfig, FieldOptions, FieldStyle,
        FormatConfig, PickerMode,
    },
    error::{Alert, ErrorHandler, PickerError},
    field::DatePickerField,
    format::DateFormat,
    state::{
        ConfirmPayload, DisplayState, Effect, FieldState, FocusedEnd, Msg, SelectionEvent,
        SelectionState, Transition,
    },
};
