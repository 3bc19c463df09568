//! Front-end session state.
//!
//! DESIGN
//! ======
//! One `Session` per user: the current `View` plus one `Panel` per analysis
//! kind. A panel walks idle → loading → done/failed. While loading, the
//! trigger is disabled (`submit` returns `Busy`), so at most one request per
//! kind is ever outstanding. Requests cannot be cancelled; a reset or a new
//! image bumps the panel's generation so a late answer is dropped on arrival.

use std::fmt;

use tracing::{debug, error};

use crate::analysis::{AnalysisError, AnalysisKind, BloodResult, SkinResult, UrineFinding, UrineMode, XrayResult};
use crate::error::ErrorCode;
use crate::llm::ImagePayload;

// =============================================================================
// VIEW
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    DoseCalculator,
    DueDate,
    BloodGroup,
    Urine,
    Skin,
    Xray,
    Compatibility,
    Transport,
    Emergency,
}

impl View {
    pub const ALL: [View; 10] = [
        View::Home,
        View::DoseCalculator,
        View::DueDate,
        View::BloodGroup,
        View::Urine,
        View::Skin,
        View::Xray,
        View::Compatibility,
        View::Transport,
        View::Emergency,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            View::Home => "home",
            View::DoseCalculator => "calculator",
            View::DueDate => "duedate",
            View::BloodGroup => "analyzer",
            View::Urine => "urinetest",
            View::Skin => "skin",
            View::Xray => "xray",
            View::Compatibility => "compatibility",
            View::Transport => "transport",
            View::Emergency => "emergency",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            View::Home => "QuickMed Nepal",
            View::DoseCalculator => "Pediatric Dose Calculator",
            View::DueDate => "Pregnancy Due Date Calculator",
            View::BloodGroup => "Blood Group Checker",
            View::Urine => "Urine & Pregnancy Test",
            View::Skin => "Skin Check",
            View::Xray => "X-Ray Reader",
            View::Compatibility => "Blood Compatibility Chart",
            View::Transport => "Medical Transport",
            View::Emergency => "Emergency Contacts",
        }
    }

    /// The view hosting the panel for an analysis kind.
    #[must_use]
    pub fn for_kind(kind: AnalysisKind) -> Self {
        match kind {
            AnalysisKind::BloodSlide => View::BloodGroup,
            AnalysisKind::Urine | AnalysisKind::Pregnancy => View::Urine,
            AnalysisKind::Skin => View::Skin,
            AnalysisKind::Xray => View::Xray,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// =============================================================================
// PANEL
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("no image selected")]
    NoImage,
    #[error("analysis already in progress")]
    Busy,
}

impl ErrorCode for PanelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoImage => "E_NO_IMAGE",
            Self::Busy => "E_BUSY",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelStatus<T> {
    Idle,
    Loading,
    Done(T),
    /// Holds the error message; the panel shows no result.
    Failed(String),
}

/// Proof of a submission. Hand it back to [`Panel::complete`].
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    pub image: ImagePayload,
}

#[derive(Debug, Clone)]
pub struct Panel<T> {
    image: Option<ImagePayload>,
    status: PanelStatus<T>,
    generation: u64,
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Self { image: None, status: PanelStatus::Idle, generation: 0 }
    }
}

impl<T> Panel<T> {
    #[must_use]
    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> &PanelStatus<T> {
        &self.status
    }

    #[must_use]
    pub fn result(&self) -> Option<&T> {
        match &self.status {
            PanelStatus::Done(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self.status, PanelStatus::Loading)
    }

    /// Store a new image and clear any previous result.
    pub fn select_image(&mut self, image: ImagePayload) {
        self.generation += 1;
        self.image = Some(image);
        self.status = PanelStatus::Idle;
    }

    /// Start an analysis of the current image.
    ///
    /// # Errors
    ///
    /// [`PanelError::Busy`] while a request is outstanding,
    /// [`PanelError::NoImage`] when nothing has been selected.
    pub fn submit(&mut self) -> Result<Ticket, PanelError> {
        if self.is_busy() {
            return Err(PanelError::Busy);
        }
        let image = self.image.clone().ok_or(PanelError::NoImage)?;
        self.status = PanelStatus::Loading;
        Ok(Ticket { generation: self.generation, image })
    }

    /// Record the outcome of a submission. Returns `false` (and changes
    /// nothing) when the panel was reset or given a new image meanwhile.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        if ticket.generation != self.generation {
            debug!(ticket = ticket.generation, current = self.generation, "panel: stale result dropped");
            return false;
        }
        self.status = match outcome {
            Ok(result) => PanelStatus::Done(result),
            Err(message) => PanelStatus::Failed(message),
        };
        true
    }

    /// Back to the empty state. An in-flight request keeps running; its
    /// answer is discarded.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.image = None;
        self.status = PanelStatus::Idle;
    }
}

/// Adapt a failing analysis outcome for [`Panel::complete`], logging the
/// error the way the views do.
pub fn caught<T>(kind: AnalysisKind, outcome: Result<T, AnalysisError>) -> Result<T, String> {
    outcome.map_err(|e| {
        error!(kind = kind.name(), error = %e, code = e.error_code(), "panel: analysis failed");
        e.to_string()
    })
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, Default)]
pub struct Session {
    view: View,
    urine_mode: UrineMode,
    pub blood: Panel<BloodResult>,
    pub urine: Panel<Vec<UrineFinding>>,
    pub skin: Panel<SkinResult>,
    pub xray: Panel<XrayResult>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Switch views. Panels keep their state.
    pub fn navigate(&mut self, view: View) {
        debug!(from = %self.view, to = %view, "session: navigate");
        self.view = view;
    }

    #[must_use]
    pub fn urine_mode(&self) -> UrineMode {
        self.urine_mode
    }

    /// Switching between dipstick and pregnancy mode resets the urine panel.
    pub fn set_urine_mode(&mut self, mode: UrineMode) {
        self.urine_mode = mode;
        self.urine.reset();
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
