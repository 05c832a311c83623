use chrono::{Datelike as _, NaiveDate, Weekday};
use egui::{Align, Button, Color32, Grid, Layout, RichText, Ui, Vec2};

use crate::{DateFormat, FocusedEnd, PickerMode, SelectionEvent};

/// Everything a calendar gets to see of the field.
pub struct CalendarProps<'a> {
    pub mode: PickerMode,
    pub today: NaiveDate,

    /// The current-date pointer.
    pub current_date: NaiveDate,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub focused: FocusedEnd,

    /// Blocked days must not be selectable.
    pub is_date_blocked: &'a dyn Fn(NaiveDate) -> bool,

    pub head_format: &'a DateFormat,
    pub mark_text: Option<&'a str>,
    pub selected_bg_color: Option<Color32>,
    pub selected_text_color: Option<Color32>,
}

/// The calendar shown inside the field's modal.
///
/// The field never looks inside: it hands over [`CalendarProps`] every frame
/// and applies whatever [`SelectionEvent`]s come back through `on_dates_change`.
pub trait DateRangeCollaborator {
    fn ui(
        &mut self,
        ui: &mut Ui,
        props: &CalendarProps<'_>,
        on_dates_change: &mut dyn FnMut(SelectionEvent),
    );

    /// Called when the field's modal opens. Drop anything browsed last time.
    fn reset(&mut self) {}
}

/// The built-in calendar: one month at a time, Monday first.
#[derive(Clone, Debug, Default)]
pub struct MonthCalendar {
    /// `(year, month)`; `None` until first shown, then it follows the arrows.
    shown: Option<(i32, u32)>,

    /// The date the shown month was taken from. When the field moves it, the month follows.
    anchor: Option<NaiveDate>,
}

impl MonthCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `(year, month)` currently on screen, if the calendar was shown yet.
    pub fn shown_month(&self) -> Option<(i32, u32)> {
        self.shown
    }
}

impl DateRangeCollaborator for MonthCalendar {
    fn ui(
        &mut self,
        ui: &mut Ui,
        props: &CalendarProps<'_>,
        on_dates_change: &mut dyn FnMut(SelectionEvent),
    ) {
        let anchor = match props.mode {
            PickerMode::Single => props.current_date,
            PickerMode::Range => props.start_date.unwrap_or(props.current_date),
        };
        if self.anchor != Some(anchor) {
            self.anchor = Some(anchor);
            self.shown = None;
        }
        let (mut year, mut month) = self
            .shown
            .unwrap_or_else(|| (anchor.year(), anchor.month()));

        if let Some(mark_text) = props.mark_text {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(mark_text).strong());
            });
        }

        ui.horizontal(|ui| {
            if ui.button("<").on_hover_text("previous month").clicked() {
                (year, month) = shift_month(year, month, -1);
            }
            if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
                ui.label(RichText::new(props.head_format.format(first)).heading());
            }
            if ui.button(">").on_hover_text("next month").clicked() {
                (year, month) = shift_month(year, month, 1);
            }
        });
        self.shown = Some((year, month));

        let size = Vec2::splat(28.0);
        Grid::new(ui.id().with("date_field_calendar"))
            .num_columns(7)
            .spacing(Vec2::splat(2.0))
            .show(ui, |ui| {
                for name in ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"] {
                    ui.with_layout(Layout::top_down(Align::Center), |ui| {
                        ui.label(name);
                    });
                }
                ui.end_row();

                for week in month_grid(year, month) {
                    for day in week {
                        let Some(day) = day else {
                            ui.allocate_space(size);
                            continue;
                        };
                        if let Some(event) = day_button(ui, props, day, size) {
                            log::trace!("calendar selection: {event:?}");
                            on_dates_change(event);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

fn day_button(
    ui: &mut Ui,
    props: &CalendarProps<'_>,
    day: NaiveDate,
    size: Vec2,
) -> Option<SelectionEvent> {
    let selected = match props.mode {
        PickerMode::Single => day == props.current_date,
        PickerMode::Range => props.start_date == Some(day) || props.end_date == Some(day),
    };
    let in_range = matches!(
        (props.start_date, props.end_date),
        (Some(start), Some(end)) if props.mode == PickerMode::Range && start < day && day < end
    );

    let visuals = ui.visuals();
    let fill = if selected {
        props
            .selected_bg_color
            .unwrap_or(visuals.selection.bg_fill)
    } else if in_range {
        props
            .selected_bg_color
            .unwrap_or(visuals.selection.bg_fill)
            .gamma_multiply(0.4)
    } else if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        if visuals.dark_mode {
            Color32::DARK_RED
        } else {
            Color32::LIGHT_RED
        }
    } else {
        visuals.extreme_bg_color
    };
    let text_color = if selected {
        props
            .selected_text_color
            .unwrap_or(visuals.selection.stroke.color)
    } else {
        visuals.widgets.inactive.text_color()
    };
    let today_stroke = visuals.widgets.inactive.fg_stroke;

    let button = Button::new(RichText::new(day.day().to_string()).color(text_color))
        .fill(fill)
        .min_size(size);
    let response = ui.add_enabled(!(props.is_date_blocked)(day), button);

    if day == props.today {
        // Encircle today's date
        ui.painter()
            .circle_stroke(response.rect.center(), 10.0, today_stroke);
    }

    response.clicked().then(|| select_day(props, day))
}

/// The event a click on `day` produces.
pub fn select_day(props: &CalendarProps<'_>, day: NaiveDate) -> SelectionEvent {
    match props.mode {
        PickerMode::Single => SelectionEvent::PointerMoved(day),
        PickerMode::Range => {
            let (start, end, focused) = next_range(props.start_date, props.focused, day);
            SelectionEvent::RangeChanged {
                start,
                end,
                focused,
            }
        }
    }
}

/// Range stepping: with the start focused, `day` starts a new range;
/// with the end focused it closes the range unless it lies before the start.
pub fn next_range(
    start: Option<NaiveDate>,
    focused: FocusedEnd,
    day: NaiveDate,
) -> (Option<NaiveDate>, Option<NaiveDate>, FocusedEnd) {
    match (focused, start) {
        (FocusedEnd::End, Some(start)) if start <= day => {
            (Some(start), Some(day), FocusedEnd::Start)
        }
        _ => (Some(day), None, FocusedEnd::End),
    }
}

/// Monday-first weeks of a month. Cells outside the month are `None`.
fn month_grid(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return vec![];
    };

    let mut weeks = vec![];
    let mut week = [None; 7];
    for day in first.iter_days().take_while(|day| day.month() == month) {
        let column = day.weekday().num_days_from_monday() as usize;
        week[column] = Some(day);
        if column == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }

    weeks
}

fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn grid_of_a_month_starting_on_monday() {
        // January 2024 starts on a Monday and has 31 days.
        let weeks = month_grid(2024, 1);
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0], Some(date(2024, 1, 1)));
        assert_eq!(weeks[4][2], Some(date(2024, 1, 31)));
        assert_eq!(weeks[4][3], None);
    }

    #[test]
    fn grid_pads_the_first_week() {
        // September 2024 starts on a Sunday.
        let weeks = month_grid(2024, 9);
        assert_eq!(weeks[0][..6], [None::<NaiveDate>; 6]);
        assert_eq!(weeks[0][6], Some(date(2024, 9, 1)));
        assert_eq!(weeks.len(), 6);
        let days: usize = weeks
            .iter()
            .map(|week| week.iter().flatten().count())
            .sum();
        assert_eq!(days, 30);
    }

    #[test]
    fn grid_of_invalid_month_is_empty() {
        assert!(month_grid(2024, 13).is_empty());
    }

    #[test]
    fn shifting_months_wraps_years() {
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2024, 6, 0), (2024, 6));
        assert_eq!(shift_month(2024, 3, -15), (2022, 12));
    }

    #[test]
    fn first_click_starts_a_range() {
        assert_eq!(
            next_range(None, FocusedEnd::Start, date(2024, 1, 10)),
            (Some(date(2024, 1, 10)), None, FocusedEnd::End)
        );
        // An end focus without a start also starts over.
        assert_eq!(
            next_range(None, FocusedEnd::End, date(2024, 1, 10)),
            (Some(date(2024, 1, 10)), None, FocusedEnd::End)
        );
    }

    #[test]
    fn second_click_closes_the_range() {
        let start = Some(date(2024, 1, 10));
        assert_eq!(
            next_range(start, FocusedEnd::End, date(2024, 1, 15)),
            (start, Some(date(2024, 1, 15)), FocusedEnd::Start)
        );
        assert_eq!(
            next_range(start, FocusedEnd::End, date(2024, 1, 10)),
            (start, start, FocusedEnd::Start)
        );
    }

    #[test]
    fn click_before_start_restarts_the_range() {
        assert_eq!(
            next_range(Some(date(2024, 1, 10)), FocusedEnd::End, date(2024, 1, 5)),
            (Some(date(2024, 1, 5)), None, FocusedEnd::End)
        );
    }

    #[test]
    fn single_mode_click_moves_the_pointer() {
        let format = DateFormat::parse("MMMM YYYY");
        let never = |_: NaiveDate| false;
        let props = CalendarProps {
            mode: PickerMode::Single,
            today: date(2024, 1, 1),
            current_date: date(2024, 1, 1),
            start_date: None,
            end_date: None,
            focused: FocusedEnd::Start,
            is_date_blocked: &never,
            head_format: &format,
            mark_text: None,
            selected_bg_color: None,
            selected_text_color: None,
        };
        assert_eq!(
            select_day(&props, date(2024, 1, 7)),
            SelectionEvent::PointerMoved(date(2024, 1, 7))
        );
    }
}
