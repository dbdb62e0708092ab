// Dashboard contract violations
use super::panel::PanelIndex;
use thiserror::Error;

/// Raised when a caller addresses a panel the registry no longer (or never)
/// had. This means the controller and its callers are out of sync.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("panel {0} has been removed")]
    PanelRemoved(PanelIndex),

    #[error("panel {0} was never created")]
    UnknownPanel(PanelIndex),

    #[error("cannot draw a series with kind Empty in panel {0}")]
    EmptyKindSelected(PanelIndex),
}
