#![forbid(unsafe_code)]

//! Application model and event loop.
//!
//! One blocking loop on the UI thread: draw the frame, read the next event,
//! update the model. Every mutation happens inside [`App::update`], so no
//! synchronization is needed anywhere.

use std::io;

use rekey_core::event::{Event, KeyCode, KeyEventKind, Modifiers};
use rekey_core::geometry::{Rect, Sides};
use rekey_core::terminal_session::{SessionOptions, TerminalSession};
use rekey_render::buffer::Buffer;
use rekey_render::presenter;
use rekey_render::style::Style;
use rekey_widgets::block::{Block, BorderType};
use rekey_widgets::{ChangePasswordForm, FormState, Label, StatefulWidget, Widget};

use crate::cli::Opts;
use crate::theme;

const TITLE: &str = " Change Password ";
const HINT: &str = "Tab move · Enter submit · Esc cancel";

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the loop and restore the terminal.
    Exit,
}

/// The application model: the form, its interaction state, and the
/// screen-exit callback invoked when the user cancels.
pub struct App {
    form: ChangePasswordForm,
    state: FormState,
    // The navigation boundary: what "leaving this screen" means belongs to
    // the embedder, not the form.
    on_cancel: Option<Box<dyn FnMut()>>,
    status: String,
    status_style: Style,
}

impl App {
    /// Create the app model with themed form styles.
    pub fn new(ascii: bool) -> Self {
        let mask = if ascii { '*' } else { '•' };
        let form = ChangePasswordForm::new()
            .mask_char(mask)
            .ascii_meter(ascii)
            .label_style(Style::new().fg(theme::fg::MUTED))
            .input_style(Style::new().fg(theme::fg::PRIMARY))
            .focused_style(Style::new().fg(theme::fg::PRIMARY).bold())
            .error_style(Style::new().fg(theme::accent::ERROR))
            .button_style(Style::new().fg(theme::accent::INFO))
            .button_disabled_style(Style::new().fg(theme::fg::MUTED).dim())
            .policy_style(Style::new().fg(theme::fg::MUTED));

        Self {
            form,
            state: FormState::default(),
            on_cancel: None,
            status: HINT.to_string(),
            status_style: Style::new().fg(theme::fg::MUTED),
        }
    }

    /// Install the callback invoked (with no arguments) when the user
    /// cancels.
    pub fn on_cancel(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }

    /// Feed one event through the model.
    pub fn update(&mut self, event: &Event) -> Control {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
            && key.code == KeyCode::Char('c')
            && key.modifiers.contains(Modifiers::CTRL)
        {
            tracing::info!(target: "rekey::app", "interrupted");
            return Control::Exit;
        }

        self.state.handle_event(&mut self.form, event);

        if self.state.cancelled {
            tracing::info!(target: "rekey::app", "cancelled, leaving screen");
            if let Some(callback) = &mut self.on_cancel {
                callback();
            }
            return Control::Exit;
        }

        if self.state.submitted {
            // Consume the flag: the form has no terminal state and can be
            // resubmitted.
            self.state.submitted = false;
            self.status = "Password change accepted.".to_string();
            self.status_style = Style::new().fg(theme::accent::SUCCESS);
        }

        Control::Continue
    }

    /// Render the frame into the buffer.
    pub fn view(&mut self, buf: &mut Buffer) {
        let area = buf.area();
        if area.is_empty() {
            return;
        }

        let border_style = if self.form.has_form_error() {
            Style::new().fg(theme::accent::ERROR)
        } else {
            Style::new().fg(theme::fg::MUTED)
        };
        let block = Block::new()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(TITLE);
        let inner = block.inner(area).inner(Sides {
            top: 0,
            right: 1,
            bottom: 0,
            left: 1,
        });
        block.render(area, buf);

        StatefulWidget::render(&self.form, inner, buf, &mut self.state);

        if inner.height > ChangePasswordForm::HEIGHT {
            let status_y = inner.bottom().saturating_sub(1);
            Label::new(&self.status)
                .style(self.status_style)
                .render(Rect::new(inner.x, status_y, inner.width, 1), buf);
        }
    }
}

/// Run the form until the user submits, cancels, or interrupts.
///
/// # Errors
///
/// Propagates terminal I/O errors.
pub fn run(opts: &Opts) -> io::Result<()> {
    let session = TerminalSession::new(SessionOptions {
        alternate_screen: opts.alt_screen,
        hide_cursor: true,
    })?;
    let (width, height) = session.size()?;
    let mut buf = Buffer::new(width, height);
    let mut app = App::new(opts.ascii).on_cancel(|| {
        // Navigation placeholder: the embedder decides which screen comes
        // next; the standalone binary simply returns to the shell.
        tracing::info!(target: "rekey::app", "returning to previous screen");
    });

    let mut out = io::stdout();
    loop {
        buf.clear();
        app.view(&mut buf);
        presenter::present(&buf, &mut out)?;

        let Some(event) = session.read_event()? else {
            continue;
        };
        if let Event::Resize { width, height } = event {
            buf = Buffer::new(width, height);
            continue;
        }
        if app.update(&event) == Control::Exit {
            break;
        }
    }

    Ok(())
}
