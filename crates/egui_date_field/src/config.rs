use chrono::NaiveDate;
use egui::Color32;

use crate::DateFormat;

/// Pattern for the on-screen label.
pub const DEFAULT_DISPLAY_FORMAT: &str = "LL";

/// Pattern for the strings handed to the confirm callback.
pub const DEFAULT_RETURN_FORMAT: &str = "YYYY/MM/DD";

/// Put between the two endpoints of a range label.
pub const DEFAULT_RANGE_SEPARATOR: &str = "->";

/// Pattern for the calendar's month header.
pub const DEFAULT_HEAD_FORMAT: &str = "MMMM YYYY";

/// Text of the built-in confirm button.
pub const DEFAULT_BUTTON_TEXT: &str = "Send";

/// Whether the field picks one date or a start/end pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PickerMode {
    #[default]
    Single,
    Range,
}

/// Which days the calendar refuses, relative to today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockRule {
    #[default]
    None,

    /// Days strictly before today are blocked.
    BeforeToday,

    /// Days strictly after today are blocked.
    AfterToday,
}

impl BlockRule {
    /// `block_before` wins when both flags are set.
    pub fn from_flags(block_before: bool, block_after: bool) -> Self {
        if block_before {
            Self::BeforeToday
        } else if block_after {
            Self::AfterToday
        } else {
            Self::None
        }
    }

    /// Day granularity: `today` itself is never blocked.
    pub fn is_blocked(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::None => false,
            Self::BeforeToday => date < today,
            Self::AfterToday => date > today,
        }
    }
}

/// The three formatting knobs of a field, parsed once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatConfig {
    pub display_format: DateFormat,
    pub return_format: DateFormat,
    pub range_separator: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            display_format: DateFormat::parse(DEFAULT_DISPLAY_FORMAT),
            return_format: DateFormat::parse(DEFAULT_RETURN_FORMAT),
            range_separator: DEFAULT_RANGE_SEPARATOR.to_owned(),
        }
    }
}

impl FormatConfig {
    /// `"{start} {separator} {end}"`, both formatted for display.
    pub fn range_label(&self, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{} {} {}",
            self.display_format.format(start),
            self.range_separator,
            self.display_format.format(end)
        )
    }
}

/// How the field and its confirm button look.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldStyle {
    pub placeholder_color: Color32,
    pub content_text_color: Option<Color32>,
    pub text_size: f32,
    pub height: f32,
    pub border_color: Color32,
    pub border_width: f32,
    pub corner_radius: u8,
    pub center_align: bool,

    pub button_text: String,
    pub button_text_size: f32,
    pub button_text_color: Option<Color32>,
    pub button_fill: Option<Color32>,

    /// Passed to the calendar for the selected day(s).
    pub selected_bg_color: Option<Color32>,
    pub selected_text_color: Option<Color32>,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            placeholder_color: Color32::from_rgb(0xc9, 0xc9, 0xc9),
            content_text_color: None,
            text_size: 18.0,
            height: 48.0,
            border_color: Color32::from_rgb(0xbd, 0xbd, 0xbd),
            border_width: 2.0,
            corner_radius: 32,
            center_align: true,

            button_text: DEFAULT_BUTTON_TEXT.to_owned(),
            button_text_size: 20.0,
            button_text_color: None,
            button_fill: None,

            selected_bg_color: None,
            selected_text_color: None,
        }
    }
}

/// Fully resolved configuration of a [`crate::DatePickerField`].
///
/// Every fallback has already been applied, so nothing is re-resolved while the field runs.
/// Build it with the setters below, or from a [`FieldOptions`] with [`FieldOptions::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub placeholder: Option<String>,
    pub mode: PickerMode,
    pub formats: FormatConfig,
    pub block_before: bool,
    pub block_after: bool,
    pub head_format: DateFormat,
    pub mark_text: Option<String>,
    pub style: FieldStyle,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            placeholder: None,
            mode: PickerMode::Single,
            formats: FormatConfig::default(),
            block_before: false,
            block_after: false,
            head_format: DateFormat::parse(DEFAULT_HEAD_FORMAT),
            mark_text: None,
            style: FieldStyle::default(),
        }
    }
}

impl FieldConfig {
    /// Shown until the first successful confirm.
    #[inline]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// (Default: [`PickerMode::Single`])
    #[inline]
    pub fn mode(mut self, mode: PickerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Pattern for the label on the field. (Default: `"LL"`)
    /// See [`DateFormat`] for the tokens.
    #[inline]
    pub fn display_format(mut self, pattern: &str) -> Self {
        self.formats.display_format = DateFormat::parse(pattern);
        self
    }

    /// Pattern for the strings passed to the confirm callback. (Default: `"YYYY/MM/DD"`)
    #[inline]
    pub fn return_format(mut self, pattern: &str) -> Self {
        self.formats.return_format = DateFormat::parse(pattern);
        self
    }

    /// Separator between the two dates of a range label. (Default: `"->"`)
    #[inline]
    pub fn date_splitter(mut self, splitter: impl Into<String>) -> Self {
        self.formats.range_separator = splitter.into();
        self
    }

    /// Refuse days before today. Takes precedence over [`Self::block_after`].
    #[inline]
    pub fn block_before(mut self, block: bool) -> Self {
        self.block_before = block;
        self
    }

    /// Refuse days after today. Ignored while [`Self::block_before`] is set.
    #[inline]
    pub fn block_after(mut self, block: bool) -> Self {
        self.block_after = block;
        self
    }

    /// Pattern for the calendar's month header. (Default: `"MMMM YYYY"`)
    #[inline]
    pub fn head_format(mut self, pattern: &str) -> Self {
        self.head_format = DateFormat::parse(pattern);
        self
    }

    /// Caption shown above the calendar.
    #[inline]
    pub fn mark_text(mut self, text: impl Into<String>) -> Self {
        self.mark_text = Some(text.into());
        self
    }

    /// Text of the built-in confirm button. (Default: `"Send"`)
    #[inline]
    pub fn button_text(mut self, text: impl Into<String>) -> Self {
        self.style.button_text = text.into();
        self
    }

    #[inline]
    pub fn style(mut self, style: FieldStyle) -> Self {
        self.style = style;
        self
    }

    /// The blocking rule the two flags amount to.
    pub fn block_rule(&self) -> BlockRule {
        BlockRule::from_flags(self.block_before, self.block_after)
    }
}

/// Raw, all-optional field options, e.g. read from a settings file.
///
/// Missing values fall back to the defaults in [`FieldOptions::resolve`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldOptions {
    pub placeholder: Option<String>,
    pub mode: Option<PickerMode>,
    pub display_format: Option<String>,
    pub return_format: Option<String>,
    pub date_splitter: Option<String>,
    pub block_before: bool,
    pub block_after: bool,
    pub head_format: Option<String>,
    pub mark_text: Option<String>,
    pub button_text: Option<String>,
    pub center_align: Option<bool>,
    pub selected_bg_color: Option<Color32>,
    pub selected_text_color: Option<Color32>,
}

impl FieldOptions {
    /// Apply every default once and parse the patterns.
    pub fn resolve(self) -> FieldConfig {
        let Self {
            placeholder,
            mode,
            display_format,
            return_format,
            date_splitter,
            block_before,
            block_after,
            head_format,
            mark_text,
            button_text,
            center_align,
            selected_bg_color,
            selected_text_color,
        } = self;

        let defaults = FieldStyle::default();
        let style = FieldStyle {
            button_text: button_text.unwrap_or(defaults.button_text),
            center_align: center_align.unwrap_or(defaults.center_align),
            selected_bg_color,
            selected_text_color,
            ..defaults
        };

        FieldConfig {
            placeholder,
            mode: mode.unwrap_or_default(),
            formats: FormatConfig {
                display_format: DateFormat::parse(
                    display_format.as_deref().unwrap_or(DEFAULT_DISPLAY_FORMAT),
                ),
                return_format: DateFormat::parse(
                    return_format.as_deref().unwrap_or(DEFAULT_RETURN_FORMAT),
                ),
                range_separator: date_splitter
                    .unwrap_or_else(|| DEFAULT_RANGE_SEPARATOR.to_owned()),
            },
            block_before,
            block_after,
            head_format: DateFormat::parse(head_format.as_deref().unwrap_or(DEFAULT_HEAD_FORMAT)),
            mark_text,
            style,
        }
    }
}

impl From<FieldOptions> for FieldConfig {
    fn from(options: FieldOptions) -> Self {
        options.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn block_before_rejects_only_past_days() {
        let today = date(2024, 5, 20);
        let rule = BlockRule::from_flags(true, false);
        assert!(rule.is_blocked(date(2024, 5, 19), today));
        assert!(rule.is_blocked(date(2023, 12, 31), today));
        assert!(!rule.is_blocked(today, today));
        assert!(!rule.is_blocked(date(2024, 5, 21), today));
    }

    #[test]
    fn block_after_rejects_only_future_days() {
        let today = date(2024, 5, 20);
        let rule = BlockRule::from_flags(false, true);
        assert!(rule.is_blocked(date(2024, 5, 21), today));
        assert!(!rule.is_blocked(today, today));
        assert!(!rule.is_blocked(date(2024, 5, 19), today));
    }

    #[test]
    fn nothing_blocked_without_flags() {
        let today = date(2024, 5, 20);
        let rule = BlockRule::from_flags(false, false);
        assert!(!rule.is_blocked(date(1900, 1, 1), today));
        assert!(!rule.is_blocked(date(2100, 1, 1), today));
    }

    #[test]
    fn block_before_shadows_block_after() {
        assert_eq!(BlockRule::from_flags(true, true), BlockRule::BeforeToday);

        let today = date(2024, 5, 20);
        let rule = BlockRule::from_flags(true, true);
        assert!(!rule.is_blocked(date(2024, 5, 21), today));

        let config = FieldConfig::default().block_after(true).block_before(true);
        assert_eq!(config.block_rule(), BlockRule::BeforeToday);
        let config = config.block_before(false);
        assert_eq!(config.block_rule(), BlockRule::AfterToday);
    }

    #[test]
    fn empty_options_resolve_to_defaults() {
        let config = FieldOptions::default().resolve();
        assert_eq!(config, FieldConfig::default());
        assert_eq!(config.formats.display_format.pattern(), "LL");
        assert_eq!(config.formats.return_format.pattern(), "YYYY/MM/DD");
        assert_eq!(config.formats.range_separator, "->");
        assert_eq!(config.style.button_text, "Send");
        assert_eq!(config.mode, PickerMode::Single);
    }

    #[test]
    fn options_override_defaults() {
        let config = FieldOptions {
            placeholder: Some("When?".to_owned()),
            mode: Some(PickerMode::Range),
            return_format: Some("DD.MM.YYYY".to_owned()),
            date_splitter: Some("to".to_owned()),
            block_after: true,
            button_text: Some("OK".to_owned()),
            ..Default::default()
        }
        .resolve();

        assert_eq!(config.placeholder.as_deref(), Some("When?"));
        assert_eq!(config.mode, PickerMode::Range);
        assert_eq!(config.formats.display_format.pattern(), "LL");
        assert_eq!(config.formats.return_format.pattern(), "DD.MM.YYYY");
        assert_eq!(config.formats.range_separator, "to");
        assert_eq!(config.block_rule(), BlockRule::AfterToday);
        assert_eq!(config.style.button_text, "OK");
    }

    #[test]
    fn range_label_joins_with_spaces() {
        let formats = FormatConfig {
            range_separator: "to".to_owned(),
            ..Default::default()
        };
        assert_eq!(
            formats.range_label(date(2024, 1, 10), date(2024, 1, 15)),
            "January 10, 2024 to January 15, 2024"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_deserialize_with_missing_fields() {
        let options: FieldOptions =
            serde_json::from_str(r#"{ "mode": "range", "date_splitter": "~", "block_before": true }"#)
                .unwrap();
        let config = options.resolve();
        assert_eq!(config.mode, PickerMode::Range);
        assert_eq!(config.formats.range_separator, "~");
        assert_eq!(config.block_rule(), BlockRule::BeforeToday);
        assert_eq!(config.formats.return_format.pattern(), "YYYY/MM/DD");
    }
}
