//! Session flow: start screen, pause, win and loss
//!
//! The session owns its phase and the "Escape may close the dialog" flag. The
//! dialog itself is handed to every transition, so nothing here touches the
//! DOM and tests can use a fake.

/// Where the current play-through stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Start screen; the simulation has not run yet
    Initial,
    Running,
    Paused,
    Won,
    Lost,
}

/// What dismissing the dialog does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissAction {
    /// Continue the current scene where it stopped
    Resume,
    /// Throw the scene away and start over
    Restart,
}

/// Text and behaviour of the dialog for one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogContent {
    pub title: &'static str,
    pub button: &'static str,
    pub on_dismiss: DismissAction,
}

impl SessionPhase {
    /// Dialog shown while in this phase; `None` while running
    pub fn dialog(self) -> Option<DialogContent> {
        let (title, button, on_dismiss) = match self {
            SessionPhase::Running => return None,
            SessionPhase::Initial => ("Drop And Climb", "Start", DismissAction::Resume),
            SessionPhase::Paused => ("Paused", "Resume", DismissAction::Resume),
            SessionPhase::Won => ("You Win!", "Play Again", DismissAction::Restart),
            SessionPhase::Lost => ("Game Over!", "Play Again", DismissAction::Restart),
        };
        Some(DialogContent {
            title,
            button,
            on_dismiss,
        })
    }

    /// Whether the simulation advances in this phase
    pub fn is_running(self) -> bool {
        self == SessionPhase::Running
    }
}

/// How a play-through ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// The modal dialog, as seen by the session
pub trait Dialog {
    /// Show the dialog with `content`, replacing whatever it showed before
    fn open(&mut self, content: &DialogContent);
    /// Hide the dialog
    fn close(&mut self);
}

/// Session state machine
#[derive(Debug, Clone)]
pub struct Session {
    phase: SessionPhase,
    escape_closes_dialog: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Initial,
            escape_closes_dialog: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    /// Whether the pause key may dismiss the dialog right now
    pub fn escape_closes_dialog(&self) -> bool {
        self.escape_closes_dialog
    }

    /// Enter the start screen of a fresh scene
    pub fn start(&mut self, dialog: &mut impl Dialog) {
        self.enter(SessionPhase::Initial, dialog);
    }

    /// Running → Paused; ignored in any other phase
    pub fn pause(&mut self, dialog: &mut impl Dialog) -> bool {
        if !self.is_running() {
            return false;
        }
        self.enter(SessionPhase::Paused, dialog);
        true
    }

    /// Running → Won/Lost; ignored once the session has stopped running
    pub fn finish(&mut self, outcome: Outcome, dialog: &mut impl Dialog) -> bool {
        if !self.is_running() {
            return false;
        }
        let phase = match outcome {
            Outcome::Won => SessionPhase::Won,
            Outcome::Lost => SessionPhase::Lost,
        };
        self.enter(phase, dialog);
        true
    }

    /// Pause key pressed: pauses a running session, or dismisses the pause
    /// dialog. Start, win and loss screens ignore it.
    pub fn handle_pause_key(&mut self, dialog: &mut impl Dialog) -> Option<DismissAction> {
        if self.is_running() {
            self.pause(dialog);
            None
        } else if self.escape_closes_dialog {
            self.dismiss(dialog)
        } else {
            None
        }
    }

    /// Dialog dismissed (button or pause key)
    ///
    /// Resume phases go back to running; won/lost go back to the start screen
    /// and report `Restart` so the caller rebuilds the scene.
    pub fn dismiss(&mut self, dialog: &mut impl Dialog) -> Option<DismissAction> {
        let content = self.phase.dialog()?;
        dialog.close();
        match content.on_dismiss {
            DismissAction::Resume => self.set_phase(SessionPhase::Running),
            DismissAction::Restart => self.enter(SessionPhase::Initial, dialog),
        }
        log::info!("Dialog dismissed: {:?} -> {:?}", content.on_dismiss, self.phase);
        Some(content.on_dismiss)
    }

    /// Move to a halted phase and show its dialog
    fn enter(&mut self, phase: SessionPhase, dialog: &mut impl Dialog) {
        self.set_phase(phase);
        if let Some(content) = phase.dialog() {
            dialog.open(&content);
        }
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            log::info!("Session {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        self.escape_closes_dialog = phase == SessionPhase::Paused;
    }
}

/// Dialog double that records what it was asked to do
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingDialog {
    pub shown: Option<DialogContent>,
    pub opens: usize,
    pub closes: usize,
}

#[cfg(test)]
impl Dialog for RecordingDialog {
    fn open(&mut self, content: &DialogContent) {
        self.shown = Some(*content);
        self.opens += 1;
    }

    fn close(&mut self) {
        self.shown = None;
        self.closes += 1;
    }
}
