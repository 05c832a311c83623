use chrono::NaiveDate;
use egui::{Id, Ui};

use crate::{
    Alert, ConfirmPayload, DateRangeCollaborator, DisplayState, ErrorHandler, FieldConfig,
    FieldState, MonthCalendar, Msg, PickerError, SelectionEvent, SelectionState, state,
};

/// A field that shows the picked date(s) and opens a calendar modal when clicked.
///
/// Keep it in your app state and show it every frame with [`DatePickerField::show`]
/// (or `ui.add(&mut field)`):
///
/// ```
/// use egui_date_field::{DatePickerField, FieldConfig, PickerMode};
///
/// let mut field = DatePickerField::new(
///     FieldConfig::default()
///         .placeholder("Pick your stay")
///         .mode(PickerMode::Range)
///         .date_splitter("to"),
/// )
/// .on_confirm(|payload| log::info!("picked {payload:?}"));
/// # let _ = &mut field;
/// ```
///
/// All the state changes are also available without a `Ui`:
/// [`Self::open`], [`Self::close`], [`Self::on_selection_changed`] and [`Self::confirm`].
pub struct DatePickerField {
    config: FieldConfig,
    state: FieldState,
    clock: Box<dyn Fn() -> NaiveDate>,
    id_salt: Option<Id>,
    calendar: Box<dyn DateRangeCollaborator>,
    on_confirm: Option<Box<dyn FnMut(&ConfirmPayload)>>,
    on_error: ErrorHandler,
    pub(crate) custom_button: Option<Box<dyn FnMut(&mut Ui) -> bool>>,
    alert: Option<Alert>,
}

impl std::fmt::Debug for DatePickerField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePickerField")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("today", &self.today())
            .field("on_error", &self.on_error)
            .field("alert", &self.alert)
            .finish_non_exhaustive()
    }
}

impl DatePickerField {
    /// The pointer starts on today's local date.
    ///
    /// Blocking is checked against the local date at the time of the check,
    /// so a field that stays open past midnight moves with the clock.
    pub fn new(config: impl Into<FieldConfig>) -> Self {
        Self::with_clock(config, local_today)
    }

    /// Like [`Self::new`], but "today" is always `today`.
    pub fn starting_at(config: impl Into<FieldConfig>, today: NaiveDate) -> Self {
        Self::with_clock(config, move || today)
    }

    /// Like [`Self::new`], but "today" comes from `clock`.
    ///
    /// The pointer starts on what `clock` returns now.
    pub fn with_clock(
        config: impl Into<FieldConfig>,
        clock: impl Fn() -> NaiveDate + 'static,
    ) -> Self {
        let config = config.into();
        let state = FieldState::new(config.mode, clock());
        Self {
            config,
            state,
            clock: Box::new(clock),
            id_salt: None,
            calendar: Box::new(MonthCalendar::new()),
            on_confirm: None,
            on_error: ErrorHandler::default(),
            custom_button: None,
            alert: None,
        }
    }

    /// Called with the formatted selection after every successful confirm.
    #[inline]
    pub fn on_confirm(mut self, on_confirm: impl FnMut(&ConfirmPayload) + 'static) -> Self {
        self.on_confirm = Some(Box::new(on_confirm));
        self
    }

    /// Called instead of showing the default alert when a confirm is refused.
    #[inline]
    pub fn on_error(mut self, on_error: impl FnMut(PickerError) + 'static) -> Self {
        self.on_error = ErrorHandler::Callback(Box::new(on_error));
        self
    }

    /// Replace the built-in [`MonthCalendar`].
    #[inline]
    pub fn calendar(mut self, calendar: impl DateRangeCollaborator + 'static) -> Self {
        self.calendar = Box::new(calendar);
        self
    }

    /// Draw your own confirm button. Return `true` when it was pressed.
    #[inline]
    pub fn custom_button(mut self, button: impl FnMut(&mut Ui) -> bool + 'static) -> Self {
        self.custom_button = Some(Box::new(button));
        self
    }

    /// Must be set if multiple date fields are in the same Ui.
    #[inline]
    pub fn id_salt(mut self, id_salt: impl std::hash::Hash) -> Self {
        self.id_salt = Some(Id::new(id_salt));
        self
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn selection(&self) -> &SelectionState {
        &self.state.selection
    }

    pub fn display(&self) -> &DisplayState {
        &self.state.display
    }

    pub fn is_open(&self) -> bool {
        self.state.display.modal_open
    }

    /// The date blocking is measured against, read from the clock on every call.
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// What the field currently shows: the placeholder until the first confirm, then the label.
    pub fn label(&self) -> &str {
        match (&self.config.placeholder, self.state.display.has_selection) {
            (Some(placeholder), false) => placeholder,
            _ => &self.state.display.formatted_label,
        }
    }

    /// The alert waiting to be dismissed, if any.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn open(&mut self) {
        log::debug!("opening date picker");
        self.calendar.reset();
        self.apply(Msg::Open);
    }

    pub fn close(&mut self) {
        log::debug!("closing date picker");
        self.apply(Msg::Close);
    }

    /// Feed an event from the calendar.
    pub fn on_selection_changed(&mut self, event: SelectionEvent) {
        self.apply(Msg::SelectionChanged(event));
    }

    /// Whether the calendar should refuse `date`, measured against [`Self::today`].
    pub fn is_date_blocked(&self, date: NaiveDate) -> bool {
        self.config.block_rule().is_blocked(date, self.today())
    }

    /// Format the selection, close the modal and call the confirm callback.
    ///
    /// # Errors
    /// In range mode without both endpoints: the error handler runs (an alert by default),
    /// the modal stays open and nothing else changes.
    pub fn confirm(&mut self) -> Result<ConfirmPayload, PickerError> {
        let (next, result) = state::confirm(&self.state, &self.config.formats);
        self.state = next;
        match &result {
            Ok(payload) => {
                log::debug!("date picker confirmed: {payload:?}");
                if let Some(on_confirm) = &mut self.on_confirm {
                    on_confirm(payload);
                }
            }
            Err(err) => self.report(*err),
        }
        result
    }

    fn apply(&mut self, msg: Msg) {
        debug_assert!(msg != Msg::Confirm, "confirm goes through DatePickerField::confirm");
        self.state = state::update(&self.state, &self.config.formats, msg).state;
    }

    fn report(&mut self, err: PickerError) {
        log::warn!("date picker: {err}");
        match &mut self.on_error {
            ErrorHandler::Alert => self.alert = Some(err.into()),
            ErrorHandler::Callback(on_error) => on_error(err),
        }
    }

    pub(crate) fn id(&self, ui: &Ui) -> Id {
        ui.make_persistent_id(self.id_salt.unwrap_or_else(|| Id::new("date_picker_field")))
    }

    /// Run the calendar for one frame and apply what it reports.
    pub(crate) fn show_calendar(&mut self, ui: &mut Ui) {
        let block_rule = self.config.block_rule();
        let today = self.today();
        let is_date_blocked = move |date: NaiveDate| block_rule.is_blocked(date, today);
        let selection = self.state.selection;
        let props = crate::CalendarProps {
            mode: selection.mode,
            today,
            current_date: selection.single_date,
            start_date: selection.range_start,
            end_date: selection.range_end,
            focused: selection.focused_end,
            is_date_blocked: &is_date_blocked,
            head_format: &self.config.head_format,
            mark_text: self.config.mark_text.as_deref(),
            selected_bg_color: self.config.style.selected_bg_color,
            selected_text_color: self.config.style.selected_text_color,
        };

        let mut events = Vec::new();
        self.calendar.ui(ui, &props, &mut |event| events.push(event));
        for event in events {
            self.on_selection_changed(event);
        }
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
