//! Test doubles for the command layer

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::engine::{EngineError, IndexEngine};
use crate::types::IndexStats;

/// Engine double recording every call it receives
#[derive(Default)]
pub(crate) struct RecordingEngine {
    pub fail_with: Option<&'static str>,
    pub inits: RefCell<Vec<PathBuf>>,
    pub updates: RefCell<Vec<(PathBuf, bool, bool)>>,
}

impl RecordingEngine {
    pub fn failing(message: &'static str) -> Self {
        Self {
            fail_with: Some(message),
            ..Default::default()
        }
    }

    fn outcome(&self) -> Result<(), EngineError> {
        match self.fail_with {
            Some(message) => Err(EngineError::Failed(message.to_string())),
            None => Ok(()),
        }
    }
}

impl IndexEngine for RecordingEngine {
    fn initialize_project(&self, root: &Path) -> Result<(), EngineError> {
        self.inits.borrow_mut().push(root.to_path_buf());
        self.outcome()
    }

    fn index(
        &self,
        root: &Path,
        stop_on_error: bool,
        rollback_on_error: bool,
    ) -> Result<IndexStats, EngineError> {
        self.updates
            .borrow_mut()
            .push((root.to_path_buf(), stop_on_error, rollback_on_error));
        self.outcome().map(|()| IndexStats::default())
    }
}
