//! Password-gated reveal of a piece of content.
//!
//! The gate only controls visibility. The password travels with the data
//! the client already holds, so it is not an access-control boundary.

use tracing::debug;

use crate::models::{Material, Meeting};

pub const DEFAULT_TRIGGER_LABEL: &str = "View Content";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Trigger shown, content hidden.
    Closed,
    /// Password prompt shown. `error` is set after a wrong attempt.
    Prompting { error: bool },
    /// Content shown for the rest of this gate's life.
    Unlocked,
}

/// What a consumer should render for the gate right now.
#[derive(Debug, PartialEq, Eq)]
pub enum GateView<'a, T> {
    Content(&'a T),
    Trigger { label: &'a str },
    Prompt { input: &'a str, error: bool },
}

#[derive(Debug, Clone)]
pub struct AccessGate<T> {
    required_password: Option<String>,
    content: T,
    trigger_label: String,
    state: GateState,
    input: String,
}

impl<T> AccessGate<T> {
    /// A missing or empty password makes the gate a pass-through.
    pub fn new(required_password: Option<&str>, content: T) -> Self {
        let required_password = required_password
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        let state = if required_password.is_some() {
            GateState::Closed
        } else {
            GateState::Unlocked
        };

        Self {
            required_password,
            content,
            trigger_label: DEFAULT_TRIGGER_LABEL.to_string(),
            state,
            input: String::new(),
        }
    }

    pub fn with_trigger_label(mut self, label: impl Into<String>) -> Self {
        self.trigger_label = label.into();
        self
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_gated(&self) -> bool {
        self.required_password.is_some()
    }

    pub fn is_revealed(&self) -> bool {
        self.state == GateState::Unlocked
    }

    pub fn content(&self) -> Option<&T> {
        self.is_revealed().then_some(&self.content)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn view(&self) -> GateView<'_, T> {
        match self.state {
            GateState::Unlocked => GateView::Content(&self.content),
            GateState::Closed => GateView::Trigger {
                label: &self.trigger_label,
            },
            GateState::Prompting { error } => GateView::Prompt {
                input: &self.input,
                error,
            },
        }
    }

    /// Trigger activation. Only meaningful while closed.
    pub fn open_prompt(&mut self) {
        if self.state == GateState::Closed {
            self.state = GateState::Prompting { error: false };
        }
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        if matches!(self.state, GateState::Prompting { .. }) {
            self.input = value.into();
        }
    }

    /// Checks the typed input against the password with exact equality.
    ///
    /// A wrong value keeps the prompt open, clears the input and raises the
    /// error flag. Retries are unlimited. Returns whether the content is now
    /// revealed.
    pub fn submit(&mut self) -> bool {
        match self.state {
            GateState::Unlocked => true,
            GateState::Closed => false,
            GateState::Prompting { .. } => {
                if self.required_password.as_deref() == Some(self.input.as_str()) {
                    debug!("access gate unlocked");
                    self.state = GateState::Unlocked;
                    self.input.clear();
                    true
                } else {
                    self.state = GateState::Prompting { error: true };
                    self.input.clear();
                    false
                }
            }
        }
    }

    /// Types `attempt` and submits it in one step.
    pub fn try_unlock(&mut self, attempt: &str) -> bool {
        self.set_input(attempt);
        self.submit()
    }

    /// Closes the prompt and forgets the error. Typed input is kept.
    pub fn cancel(&mut self) {
        if matches!(self.state, GateState::Prompting { .. }) {
            self.state = GateState::Closed;
        }
    }
}

impl<'a> AccessGate<&'a Material> {
    pub fn for_material(material: &'a Material) -> Self {
        AccessGate::new(material.required_password(), material)
            .with_trigger_label("Access Material")
    }
}

impl<'a> AccessGate<&'a Meeting> {
    pub fn for_meeting_link(meeting: &'a Meeting) -> Self {
        AccessGate::new(meeting.link_password(), meeting).with_trigger_label("Unlock Link")
    }
}
