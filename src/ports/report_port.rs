//! Decision report port.

use crate::domain::decision::Decision;
use crate::domain::error::SwingError;
use std::path::Path;

/// Port for exporting a batch of decisions.
pub trait ReportPort {
    fn write(&self, decisions: &[Decision], output_path: &Path) -> Result<(), SwingError>;
}
