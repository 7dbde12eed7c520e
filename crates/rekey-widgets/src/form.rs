#![forbid(unsafe_code)]

//! The password-change form: field values, required-field validation, and
//! the stateful widget that renders and edits them.
//!
//! Data flows one way: a keystroke updates the focused field value, which
//! clears that field's error flag (when the value is non-empty) and
//! recomputes the strength level. `validate_required` only ever *adds*
//! error flags; clearing is the job of [`ChangePasswordForm::set_field`].

use rekey_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use rekey_core::geometry::Rect;
use rekey_render::buffer::Buffer;
use rekey_render::cell::StyleFlags;
use rekey_render::style::Style;
use unicode_segmentation::UnicodeSegmentation;

use crate::meter::StrengthMeter;
use crate::strength::Strength;
use crate::{StatefulWidget, draw_text_span};

const REQUIRED_MESSAGE: &str = "This field is required";
const POLICY_HEADER: &str = "Password Policy";
// Displayed policy. Presentational only: the form never enforces these
// rules, matching the surface it replaces.
const POLICY_LINES: [&str; 6] = [
    "- Cannot be any of the previous 1 passwords",
    "- Must have at least 1 special character",
    "- Must have at least 1 upper case character",
    "- Must have at least 1 lower case character",
    "- Must have at least 8 characters",
    "- Cannot have spaces",
];
const CONTINUE_LABEL: &str = "[ Continue ]";
const CANCEL_LABEL: &str = "[ Cancel ]";

// ---------------------------------------------------------------------------
// Field model
// ---------------------------------------------------------------------------

/// The form's fields, as an enumerated key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The candidate new password.
    NewPassword,
    /// The re-typed password.
    Confirm,
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Field; 2] = [Field::NewPassword, Field::Confirm];

    /// The label rendered above the input.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewPassword => "New password",
            Self::Confirm => "Re-type password",
        }
    }
}

/// Current field values. Created on form construction, discarded with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FormValues {
    new_password: String,
    confirm: String,
}

impl FormValues {
    fn get(&self, field: Field) -> &str {
        match field {
            Field::NewPassword => &self.new_password,
            Field::Confirm => &self.confirm,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::NewPassword => self.new_password = value,
            Field::Confirm => self.confirm = value,
        }
    }
}

/// Per-field error flags plus the whole-form error message.
///
/// `form` holds the empty string unless a whole-form error is ever raised;
/// no current code path writes a non-empty value, but the render path for
/// it is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Required-field violation on the new password.
    pub new_password: bool,
    /// Required-field violation on the re-typed password.
    pub confirm: bool,
    /// Whole-form error message; empty string means no error.
    pub form: String,
}

impl FieldErrors {
    /// The flag for a field.
    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::NewPassword => self.new_password,
            Field::Confirm => self.confirm,
        }
    }

    fn set(&mut self, field: Field, flag: bool) {
        match field {
            Field::NewPassword => self.new_password = flag,
            Field::Confirm => self.confirm = flag,
        }
    }
}

// ---------------------------------------------------------------------------
// ChangePasswordForm – values, errors, and the operations over them
// ---------------------------------------------------------------------------

/// The password-change form.
///
/// Owns field values, error flags, and the derived strength level; the
/// mutable interaction state (focus, cursor, submitted/cancelled) lives in
/// [`FormState`].
#[derive(Debug, Clone)]
pub struct ChangePasswordForm {
    values: FormValues,
    errors: FieldErrors,
    strength: Strength,
    mask_char: char,
    ascii_meter: bool,
    label_style: Style,
    input_style: Style,
    focused_style: Style,
    error_style: Style,
    button_style: Style,
    button_disabled_style: Style,
    policy_style: Style,
}

impl Default for ChangePasswordForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangePasswordForm {
    /// Rows the widget occupies at full height.
    pub const HEIGHT: u16 = 20;

    /// Create an empty form.
    pub fn new() -> Self {
        Self {
            values: FormValues::default(),
            errors: FieldErrors::default(),
            strength: Strength::None,
            mask_char: '•',
            ascii_meter: false,
            label_style: Style::default(),
            input_style: Style::default(),
            focused_style: Style::default(),
            error_style: Style::default(),
            button_style: Style::default(),
            button_disabled_style: Style::default(),
            policy_style: Style::default(),
        }
    }

    /// Set the input mask character.
    pub fn mask_char(mut self, mask: char) -> Self {
        self.mask_char = mask;
        self
    }

    /// Use ASCII characters for the strength meter bar.
    pub fn ascii_meter(mut self, ascii: bool) -> Self {
        self.ascii_meter = ascii;
        self
    }

    /// Set the field label style.
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    /// Set the input value style.
    pub fn input_style(mut self, style: Style) -> Self {
        self.input_style = style;
        self
    }

    /// Set the style for the focused element.
    pub fn focused_style(mut self, style: Style) -> Self {
        self.focused_style = style;
        self
    }

    /// Set the error message style.
    pub fn error_style(mut self, style: Style) -> Self {
        self.error_style = style;
        self
    }

    /// Set the button style.
    pub fn button_style(mut self, style: Style) -> Self {
        self.button_style = style;
        self
    }

    /// Set the style for the disabled submit button.
    pub fn button_disabled_style(mut self, style: Style) -> Self {
        self.button_disabled_style = style;
        self
    }

    /// Set the policy list style.
    pub fn policy_style(mut self, style: Style) -> Self {
        self.policy_style = style;
        self
    }

    // -- Operations ---------------------------------------------------------

    /// The current value of a field.
    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    /// The current error flags.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The strength classification of the current new password.
    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// Whether a whole-form error message is set.
    pub fn has_form_error(&self) -> bool {
        !self.errors.form.is_empty()
    }

    /// Store a new value for a field.
    ///
    /// A non-empty value clears that field's error flag and the whole-form
    /// message. An empty value is stored but leaves every flag untouched:
    /// flags for empty fields are only ever set by [`Self::validate_required`].
    /// A change to the new password recomputes the strength level.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value.into());
        if !self.values.get(field).is_empty() {
            self.errors.set(field, false);
            self.errors.form.clear();
        }
        if field == Field::NewPassword {
            self.strength = Strength::classify(self.values.get(Field::NewPassword));
        }
    }

    /// Flag every empty field as a required-field violation.
    ///
    /// Only ever adds flags; a field that has since been filled keeps its
    /// stale flag until the user retypes. Idempotent.
    pub fn validate_required(&mut self) {
        for field in Field::ALL {
            if self.values.get(field).is_empty() {
                self.errors.set(field, true);
            }
        }
    }

    /// Whether the submit button is disabled.
    ///
    /// True iff either field is currently empty; error flags are not
    /// consulted.
    pub fn is_submit_disabled(&self) -> bool {
        self.values.get(Field::NewPassword).is_empty()
            || self.values.get(Field::Confirm).is_empty()
    }

    /// Attempt submission: validate required fields, then accept iff both
    /// values are present.
    ///
    /// The two passwords are not compared with each other. The accepted
    /// path performs no I/O beyond a diagnostic trace; the caller decides
    /// what acceptance means.
    pub fn submit(&mut self) -> bool {
        self.validate_required();
        let accepted = !self.values.get(Field::NewPassword).is_empty()
            && !self.values.get(Field::Confirm).is_empty();
        #[cfg(feature = "tracing")]
        if accepted {
            tracing::info!(target: "rekey::form", "password change accepted");
        } else {
            tracing::debug!(target: "rekey::form", "submit refused, required field missing");
        }
        accepted
    }
}

// ---------------------------------------------------------------------------
// FormState
// ---------------------------------------------------------------------------

/// Everything that can take keyboard focus, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// The new-password input.
    #[default]
    NewPassword,
    /// The re-type input.
    Confirm,
    /// The Continue (submit) button.
    ContinueButton,
    /// The Cancel button.
    CancelButton,
}

impl FocusTarget {
    const CYCLE: [FocusTarget; 4] = [
        FocusTarget::NewPassword,
        FocusTarget::Confirm,
        FocusTarget::ContinueButton,
        FocusTarget::CancelButton,
    ];

    /// The next target in the cycle (wraps).
    pub fn next(self) -> Self {
        let i = Self::CYCLE.iter().position(|t| *t == self).unwrap_or(0);
        Self::CYCLE[(i + 1) % Self::CYCLE.len()]
    }

    /// The previous target in the cycle (wraps).
    pub fn prev(self) -> Self {
        let i = Self::CYCLE.iter().position(|t| *t == self).unwrap_or(0);
        Self::CYCLE[(i + Self::CYCLE.len() - 1) % Self::CYCLE.len()]
    }

    /// The field under this target, if it is an input.
    pub const fn field(self) -> Option<Field> {
        match self {
            Self::NewPassword => Some(Field::NewPassword),
            Self::Confirm => Some(Field::Confirm),
            _ => None,
        }
    }
}

/// Mutable interaction state for a [`ChangePasswordForm`].
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Currently focused element.
    pub focus: FocusTarget,
    /// Set when a submission was accepted; consumed by the caller.
    pub submitted: bool,
    /// Set when the user cancelled; consumed by the caller.
    pub cancelled: bool,
    /// Cursor position within the focused input (grapheme index).
    pub text_cursor: usize,
}

impl FormState {
    /// Handle a terminal event. Returns `true` if state changed.
    pub fn handle_event(&mut self, form: &mut ChangePasswordForm, event: &Event) -> bool {
        if self.submitted || self.cancelled {
            return false;
        }

        if let Event::Key(key) = event
            && (key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat)
        {
            return self.handle_key(form, key);
        }
        false
    }

    fn handle_key(&mut self, form: &mut ChangePasswordForm, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                self.sync_text_cursor(form);
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                self.sync_text_cursor(form);
                true
            }
            KeyCode::Enter => {
                self.activate(form);
                true
            }
            KeyCode::Escape => {
                self.cancelled = true;
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(Modifiers::CTRL) => {
                match self.focus.field() {
                    Some(field) => self.handle_text_char(form, field, c),
                    // Space activates a focused button, like Enter.
                    None if c == ' ' => {
                        self.activate(form);
                        true
                    }
                    None => false,
                }
            }
            KeyCode::Backspace => self.handle_text_backspace(form),
            KeyCode::Delete => self.handle_text_delete(form),
            KeyCode::Left => self.handle_text_left(),
            KeyCode::Right => self.handle_text_right(form),
            KeyCode::Home => self.handle_text_home(),
            KeyCode::End => self.handle_text_end(form),
            _ => false,
        }
    }

    // Enter / Space on the current focus target. The Cancel button is the
    // only target that cancels; everywhere else submits, so pressing Enter
    // inside an input behaves like the original form's implicit submission.
    fn activate(&mut self, form: &mut ChangePasswordForm) {
        if self.focus == FocusTarget::CancelButton {
            self.cancelled = true;
        } else if form.submit() {
            self.submitted = true;
        }
    }

    fn handle_text_char(&mut self, form: &mut ChangePasswordForm, field: Field, c: char) -> bool {
        let mut value = form.value(field).to_string();
        let before = grapheme_count(&value);
        let byte_offset = grapheme_byte_offset(&value, self.text_cursor);
        value.insert(byte_offset, c);
        let after = grapheme_count(&value);
        form.set_field(field, value);
        if after > before {
            self.text_cursor += 1;
        } else {
            self.text_cursor = self.text_cursor.min(after);
        }
        true
    }

    fn handle_text_backspace(&mut self, form: &mut ChangePasswordForm) -> bool {
        let Some(field) = self.focus.field() else {
            return false;
        };
        if self.text_cursor == 0 {
            return false;
        }
        let mut value = form.value(field).to_string();
        let byte_start = grapheme_byte_offset(&value, self.text_cursor - 1);
        let byte_end = grapheme_byte_offset(&value, self.text_cursor);
        value.drain(byte_start..byte_end);
        form.set_field(field, value);
        self.text_cursor -= 1;
        true
    }

    fn handle_text_delete(&mut self, form: &mut ChangePasswordForm) -> bool {
        let Some(field) = self.focus.field() else {
            return false;
        };
        let mut value = form.value(field).to_string();
        if self.text_cursor >= grapheme_count(&value) {
            return false;
        }
        let byte_start = grapheme_byte_offset(&value, self.text_cursor);
        let byte_end = grapheme_byte_offset(&value, self.text_cursor + 1);
        value.drain(byte_start..byte_end);
        form.set_field(field, value);
        true
    }

    fn handle_text_left(&mut self) -> bool {
        if self.focus.field().is_some() && self.text_cursor > 0 {
            self.text_cursor -= 1;
            return true;
        }
        false
    }

    fn handle_text_right(&mut self, form: &ChangePasswordForm) -> bool {
        if let Some(field) = self.focus.field()
            && self.text_cursor < grapheme_count(form.value(field))
        {
            self.text_cursor += 1;
            return true;
        }
        false
    }

    fn handle_text_home(&mut self) -> bool {
        if self.focus.field().is_some() {
            self.text_cursor = 0;
            return true;
        }
        false
    }

    fn handle_text_end(&mut self, form: &ChangePasswordForm) -> bool {
        if let Some(field) = self.focus.field() {
            self.text_cursor = grapheme_count(form.value(field));
            return true;
        }
        false
    }

    /// Clamp the text cursor when focus moves.
    fn sync_text_cursor(&mut self, form: &ChangePasswordForm) {
        match self.focus.field() {
            Some(field) => {
                self.text_cursor = self.text_cursor.min(grapheme_count(form.value(field)));
            }
            None => self.text_cursor = 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

impl StatefulWidget for ChangePasswordForm {
    type State = FormState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("widget_render", widget = "ChangePasswordForm").entered();

        let mut y = area.y;
        let mut row = |lines: u16| {
            let at = y;
            y = y.saturating_add(lines);
            at
        };
        let max_y = area.bottom();

        // Policy list
        let header_y = row(1);
        if header_y < max_y {
            draw_text_span(buf, area.x, header_y, POLICY_HEADER, self.policy_style, area.right());
        }
        for line in POLICY_LINES {
            let line_y = row(1);
            if line_y < max_y {
                draw_text_span(buf, area.x, line_y, line, self.policy_style, area.right());
            }
        }
        row(1);

        // New password
        self.render_field(buf, area, &mut row, max_y, Field::NewPassword, state);

        // Strength meter (two-row slot: label + bar)
        let meter_y = row(2);
        if meter_y < max_y {
            let password = self.value(Field::NewPassword);
            let mut meter = StrengthMeter::for_password(password).label_style(self.label_style);
            if self.ascii_meter {
                meter = meter.ascii();
            }
            let slot_h = max_y.min(meter_y.saturating_add(2)) - meter_y;
            let slot = Rect::new(area.x, meter_y, area.width, slot_h);
            crate::Widget::render(&meter, slot, buf);
        }
        row(1);

        // Re-type password
        self.render_field(buf, area, &mut row, max_y, Field::Confirm, state);
        row(1);

        // Buttons
        let buttons_y = row(1);
        if buttons_y < max_y {
            self.render_buttons(buf, area, buttons_y, state);
        }

        // Whole-form error message (no current writer, render path kept)
        let form_error_y = row(1);
        if form_error_y < max_y && self.has_form_error() {
            draw_text_span(
                buf,
                area.x,
                form_error_y,
                &self.errors.form,
                self.error_style,
                area.right(),
            );
        }
    }
}

impl ChangePasswordForm {
    fn render_field(
        &self,
        buf: &mut Buffer,
        area: Rect,
        row: &mut impl FnMut(u16) -> u16,
        max_y: u16,
        field: Field,
        state: &FormState,
    ) {
        let focused = state.focus.field() == Some(field);

        let label_y = row(1);
        if label_y < max_y {
            let style = if focused {
                self.focused_style
            } else {
                self.label_style
            };
            draw_text_span(buf, area.x, label_y, field.label(), style, area.right());
        }

        let input_y = row(1);
        if input_y < max_y {
            let count = grapheme_count(self.value(field));
            let masked: String = std::iter::repeat_n(self.mask_char, count).collect();
            let style = if focused {
                self.focused_style
            } else {
                self.input_style
            };
            draw_text_span(buf, area.x, input_y, &masked, style, area.right());

            if focused {
                let cursor_x = area
                    .x
                    .saturating_add(state.text_cursor.min(count) as u16);
                if cursor_x < area.right()
                    && let Some(cell) = buf.get_mut(cursor_x, input_y)
                {
                    cell.flags ^= StyleFlags::REVERSE;
                }
            }
        }

        let error_y = row(1);
        if error_y < max_y && self.errors.get(field) {
            draw_text_span(
                buf,
                area.x,
                error_y,
                REQUIRED_MESSAGE,
                self.error_style,
                area.right(),
            );
        }
    }

    fn render_buttons(&self, buf: &mut Buffer, area: Rect, y: u16, state: &FormState) {
        let mut continue_style = if self.is_submit_disabled() {
            self.button_disabled_style
        } else {
            self.button_style
        };
        if state.focus == FocusTarget::ContinueButton {
            continue_style = continue_style.reverse();
        }
        let mut cancel_style = self.button_style;
        if state.focus == FocusTarget::CancelButton {
            cancel_style = cancel_style.reverse();
        }

        let end = draw_text_span(buf, area.x, y, CONTINUE_LABEL, continue_style, area.right());
        draw_text_span(buf, end.saturating_add(2), y, CANCEL_LABEL, cancel_style, area.right());
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Count grapheme clusters in a string.
fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Get byte offset of the nth grapheme cluster.
fn grapheme_byte_offset(s: &str, grapheme_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(grapheme_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn type_str(state: &mut FormState, form: &mut ChangePasswordForm, s: &str) {
        for c in s.chars() {
            state.handle_event(form, &press(KeyCode::Char(c)));
        }
    }

    // -- set_field / error clearing --

    #[test]
    fn set_field_stores_value() {
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::NewPassword, "abc");
        assert_eq!(form.value(Field::NewPassword), "abc");
        assert_eq!(form.value(Field::Confirm), "");
    }

    #[test]
    fn nonempty_value_clears_field_and_form_errors() {
        let mut form = ChangePasswordForm::new();
        form.validate_required();
        assert!(form.errors().new_password);
        assert!(form.errors().confirm);

        form.set_field(Field::NewPassword, "x");
        assert!(!form.errors().new_password);
        // The other field's flag is untouched.
        assert!(form.errors().confirm);
    }

    #[test]
    fn empty_value_neither_sets_nor_clears_flags() {
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::NewPassword, "");
        assert!(!form.errors().new_password);

        form.validate_required();
        form.set_field(Field::NewPassword, "");
        assert!(form.errors().new_password, "typing an empty value must not clear the flag");
    }

    #[test]
    fn required_then_retype_transition() {
        // Validation flags the empty field; a later non-empty change
        // clears it.
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::NewPassword, "");
        form.validate_required();
        assert!(form.errors().new_password);

        form.set_field(Field::NewPassword, "x");
        assert!(!form.errors().new_password);
    }

    #[test]
    fn set_field_recomputes_strength_only_for_new_password() {
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::Confirm, "Ab1!");
        assert_eq!(form.strength(), Strength::None);

        form.set_field(Field::NewPassword, "Ab1!");
        assert_eq!(form.strength(), Strength::Strong);

        form.set_field(Field::NewPassword, "");
        assert_eq!(form.strength(), Strength::None);
    }

    // -- validate_required --

    #[test]
    fn validate_required_is_idempotent() {
        let mut form = ChangePasswordForm::new();
        form.validate_required();
        let first = form.errors().clone();
        form.validate_required();
        assert_eq!(*form.errors(), first);
        assert!(form.errors().new_password);
        assert!(form.errors().confirm);
    }

    #[test]
    fn validate_required_never_clears_flags() {
        let mut form = ChangePasswordForm::new();
        form.validate_required();
        // Fill the field without going through set_field's clearing path.
        form.values.set(Field::NewPassword, "present".into());
        form.validate_required();
        assert!(
            form.errors().new_password,
            "validation must not clear a stale flag for a now-present field"
        );
    }

    // -- is_submit_disabled --

    #[test]
    fn submit_disabled_iff_either_field_empty() {
        let mut form = ChangePasswordForm::new();
        assert!(form.is_submit_disabled());

        form.set_field(Field::NewPassword, "a");
        assert!(form.is_submit_disabled());

        form.set_field(Field::Confirm, "b");
        assert!(!form.is_submit_disabled());

        form.set_field(Field::NewPassword, "");
        assert!(form.is_submit_disabled());
    }

    #[test]
    fn submit_disabled_ignores_error_flags() {
        let mut form = ChangePasswordForm::new();
        form.values.set(Field::NewPassword, "a".into());
        form.values.set(Field::Confirm, "b".into());
        form.errors.new_password = true;
        assert!(!form.is_submit_disabled());
    }

    // -- submit --

    #[test]
    fn submit_refuses_and_flags_missing_fields() {
        let mut form = ChangePasswordForm::new();
        assert!(!form.submit());
        assert!(form.errors().new_password);
        assert!(form.errors().confirm);
    }

    #[test]
    fn submit_accepts_when_both_present() {
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::NewPassword, "a");
        form.set_field(Field::Confirm, "b");
        assert!(form.submit());
    }

    #[test]
    fn submit_accepts_mismatched_passwords() {
        // Presence-only validation: the confirm field is never compared to
        // the new password.
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::NewPassword, "first-password");
        form.set_field(Field::Confirm, "completely different");
        assert!(form.submit());
    }

    #[test]
    fn form_error_message_is_never_written() {
        let mut form = ChangePasswordForm::new();
        form.validate_required();
        form.submit();
        form.set_field(Field::NewPassword, "x");
        form.submit();
        assert!(!form.has_form_error());
        assert_eq!(form.errors().form, "");
    }

    #[test]
    fn form_can_be_resubmitted() {
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::NewPassword, "a");
        form.set_field(Field::Confirm, "b");
        assert!(form.submit());
        assert!(form.submit());
    }

    // -- Focus cycling --

    #[test]
    fn tab_cycles_focus_forward_and_wraps() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        assert_eq!(state.focus, FocusTarget::NewPassword);

        state.handle_event(&mut form, &press(KeyCode::Tab));
        assert_eq!(state.focus, FocusTarget::Confirm);
        state.handle_event(&mut form, &press(KeyCode::Tab));
        assert_eq!(state.focus, FocusTarget::ContinueButton);
        state.handle_event(&mut form, &press(KeyCode::Tab));
        assert_eq!(state.focus, FocusTarget::CancelButton);
        state.handle_event(&mut form, &press(KeyCode::Tab));
        assert_eq!(state.focus, FocusTarget::NewPassword);
    }

    #[test]
    fn backtab_cycles_focus_backward() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();

        state.handle_event(&mut form, &press(KeyCode::BackTab));
        assert_eq!(state.focus, FocusTarget::CancelButton);
        state.handle_event(&mut form, &press(KeyCode::BackTab));
        assert_eq!(state.focus, FocusTarget::ContinueButton);
    }

    #[test]
    fn focus_change_clamps_cursor() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        type_str(&mut state, &mut form, "abcdef");
        assert_eq!(state.text_cursor, 6);

        // Move to the empty confirm field: cursor clamps to 0.
        state.handle_event(&mut form, &press(KeyCode::Tab));
        assert_eq!(state.text_cursor, 0);
    }

    // -- Text editing --

    #[test]
    fn typing_updates_value_and_strength() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        type_str(&mut state, &mut form, "Ab1");
        assert_eq!(form.value(Field::NewPassword), "Ab1");
        assert_eq!(form.strength(), Strength::Good);

        state.handle_event(&mut form, &press(KeyCode::Char('!')));
        assert_eq!(form.strength(), Strength::Strong);
    }

    #[test]
    fn typing_clears_required_error() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        form.validate_required();
        assert!(form.errors().new_password);

        state.handle_event(&mut form, &press(KeyCode::Char('x')));
        assert!(!form.errors().new_password);
    }

    #[test]
    fn backspace_to_empty_keeps_error_clear_semantics() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        type_str(&mut state, &mut form, "a");
        state.handle_event(&mut form, &press(KeyCode::Backspace));
        assert_eq!(form.value(Field::NewPassword), "");
        // Erasing to empty neither sets nor clears flags.
        assert!(!form.errors().new_password);
        assert_eq!(form.strength(), Strength::None);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        type_str(&mut state, &mut form, "ab");
        state.handle_event(&mut form, &press(KeyCode::Home));
        let changed = state.handle_event(&mut form, &press(KeyCode::Backspace));
        assert!(!changed);
        assert_eq!(form.value(Field::NewPassword), "ab");
    }

    #[test]
    fn delete_removes_at_cursor() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        type_str(&mut state, &mut form, "abc");
        state.handle_event(&mut form, &press(KeyCode::Home));
        state.handle_event(&mut form, &press(KeyCode::Delete));
        assert_eq!(form.value(Field::NewPassword), "bc");
        assert_eq!(state.text_cursor, 0);
    }

    #[test]
    fn delete_at_end_is_noop() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        type_str(&mut state, &mut form, "abc");
        let changed = state.handle_event(&mut form, &press(KeyCode::Delete));
        assert!(!changed);
        assert_eq!(form.value(Field::NewPassword), "abc");
    }

    #[test]
    fn cursor_movement_keys() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        type_str(&mut state, &mut form, "hello");
        assert_eq!(state.text_cursor, 5);

        state.handle_event(&mut form, &press(KeyCode::Left));
        assert_eq!(state.text_cursor, 4);
        state.handle_event(&mut form, &press(KeyCode::Right));
        assert_eq!(state.text_cursor, 5);
        state.handle_event(&mut form, &press(KeyCode::Home));
        assert_eq!(state.text_cursor, 0);
        state.handle_event(&mut form, &press(KeyCode::End));
        assert_eq!(state.text_cursor, 5);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        type_str(&mut state, &mut form, "ac");
        state.handle_event(&mut form, &press(KeyCode::Left));
        state.handle_event(&mut form, &press(KeyCode::Char('b')));
        assert_eq!(form.value(Field::NewPassword), "abc");
        assert_eq!(state.text_cursor, 2);
    }

    #[test]
    fn editing_the_confirm_field() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        state.handle_event(&mut form, &press(KeyCode::Tab));
        type_str(&mut state, &mut form, "xy");
        assert_eq!(form.value(Field::Confirm), "xy");
        assert_eq!(form.value(Field::NewPassword), "");
    }

    #[test]
    fn ctrl_char_is_not_inserted() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL));
        state.handle_event(&mut form, &ev);
        assert_eq!(form.value(Field::NewPassword), "");
    }

    // -- Submit and cancel through events --

    #[test]
    fn enter_submits_when_fields_filled() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        type_str(&mut state, &mut form, "secret");
        state.handle_event(&mut form, &press(KeyCode::Tab));
        type_str(&mut state, &mut form, "secret");

        state.handle_event(&mut form, &press(KeyCode::Enter));
        assert!(state.submitted);
        assert!(!state.cancelled);
    }

    #[test]
    fn enter_with_empty_fields_flags_errors_without_submitting() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        state.handle_event(&mut form, &press(KeyCode::Enter));
        assert!(!state.submitted);
        assert!(form.errors().new_password);
        assert!(form.errors().confirm);
    }

    #[test]
    fn escape_cancels_from_anywhere() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        state.handle_event(&mut form, &press(KeyCode::Escape));
        assert!(state.cancelled);
        assert!(!state.submitted);
    }

    #[test]
    fn enter_on_cancel_button_cancels() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState {
            focus: FocusTarget::CancelButton,
            ..Default::default()
        };
        state.handle_event(&mut form, &press(KeyCode::Enter));
        assert!(state.cancelled);
        assert!(!state.submitted);
    }

    #[test]
    fn space_activates_focused_button() {
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::NewPassword, "a");
        form.set_field(Field::Confirm, "b");
        let mut state = FormState {
            focus: FocusTarget::ContinueButton,
            ..Default::default()
        };
        state.handle_event(&mut form, &press(KeyCode::Char(' ')));
        assert!(state.submitted);
    }

    #[test]
    fn space_in_input_is_a_character() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        state.handle_event(&mut form, &press(KeyCode::Char(' ')));
        assert_eq!(form.value(Field::NewPassword), " ");
        // Space is a non-word character.
        assert_eq!(form.strength(), Strength::Weak);
    }

    #[test]
    fn events_ignored_after_submit() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState {
            submitted: true,
            ..Default::default()
        };
        assert!(!state.handle_event(&mut form, &press(KeyCode::Tab)));
    }

    #[test]
    fn events_ignored_after_cancel() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState {
            cancelled: true,
            ..Default::default()
        };
        assert!(!state.handle_event(&mut form, &press(KeyCode::Char('a'))));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('a')).with_kind(KeyEventKind::Release));
        assert!(!state.handle_event(&mut form, &ev));
        assert_eq!(form.value(Field::NewPassword), "");
    }

    // -- Rendering --

    fn render_form(form: &ChangePasswordForm, state: &mut FormState, w: u16, h: u16) -> Buffer {
        let mut buf = Buffer::new(w, h);
        StatefulWidget::render(form, Rect::new(0, 0, w, h), &mut buf, state);
        buf
    }

    #[test]
    fn render_shows_policy_and_labels() {
        let form = ChangePasswordForm::new();
        let mut state = FormState::default();
        let buf = render_form(&form, &mut state, 60, ChangePasswordForm::HEIGHT);

        assert!(buf.row_string(0).starts_with("Password Policy"));
        assert!(buf.row_string(1).starts_with("- Cannot be any of the previous 1 passwords"));
        assert!(buf.row_string(8).starts_with("New password"));
        assert!(buf.row_string(14).starts_with("Re-type password"));
        assert!(buf.row_string(18).contains("[ Continue ]"));
        assert!(buf.row_string(18).contains("[ Cancel ]"));
    }

    #[test]
    fn render_masks_input_values() {
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::NewPassword, "abc");
        let mut state = FormState::default();
        let buf = render_form(&form, &mut state, 60, ChangePasswordForm::HEIGHT);

        assert!(buf.row_string(9).starts_with("•••"));
        assert!(!buf.row_string(9).contains("abc"));
    }

    #[test]
    fn render_shows_required_errors() {
        let mut form = ChangePasswordForm::new();
        form.validate_required();
        let mut state = FormState::default();
        let buf = render_form(&form, &mut state, 60, ChangePasswordForm::HEIGHT);

        assert!(buf.row_string(10).starts_with(REQUIRED_MESSAGE));
        assert!(buf.row_string(16).starts_with(REQUIRED_MESSAGE));
    }

    #[test]
    fn render_hides_errors_when_clear() {
        let form = ChangePasswordForm::new();
        let mut state = FormState::default();
        let buf = render_form(&form, &mut state, 60, ChangePasswordForm::HEIGHT);

        assert!(!buf.row_string(10).contains(REQUIRED_MESSAGE));
        assert!(!buf.row_string(16).contains(REQUIRED_MESSAGE));
    }

    #[test]
    fn render_shows_strength_label_for_nonempty_password() {
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::NewPassword, "Ab1!");
        let mut state = FormState::default();
        let buf = render_form(&form, &mut state, 60, ChangePasswordForm::HEIGHT);

        assert!(buf.row_string(11).starts_with("Password strength - strong"));
    }

    #[test]
    fn render_hides_strength_label_for_empty_password() {
        let form = ChangePasswordForm::new();
        let mut state = FormState::default();
        let buf = render_form(&form, &mut state, 60, ChangePasswordForm::HEIGHT);

        assert!(!buf.row_string(11).contains("Password strength"));
    }

    #[test]
    fn render_cursor_is_reversed_on_focused_input() {
        let mut form = ChangePasswordForm::new();
        let mut state = FormState::default();
        type_str(&mut state, &mut form, "ab");
        let buf = render_form(&form, &mut state, 60, ChangePasswordForm::HEIGHT);

        let cursor_cell = buf.get(2, 9).unwrap();
        assert!(cursor_cell.flags.contains(StyleFlags::REVERSE));
    }

    #[test]
    fn render_zero_area_does_not_panic() {
        let form = ChangePasswordForm::new();
        let mut state = FormState::default();
        let mut buf = Buffer::new(1, 1);
        StatefulWidget::render(&form, Rect::new(0, 0, 0, 0), &mut buf, &mut state);
    }

    #[test]
    fn render_small_area_is_clipped() {
        let mut form = ChangePasswordForm::new();
        form.set_field(Field::NewPassword, "abc");
        let mut state = FormState::default();
        // Only the policy header fits.
        let buf = render_form(&form, &mut state, 20, 1);
        assert!(buf.row_string(0).starts_with("Password Policy"));
    }
}
