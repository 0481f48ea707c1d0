//! Dialogue kinds, stages, sessions, and per-kind request drafts.

use std::collections::BTreeMap;

use rcommon::ModelId;
use rtable::{Series, Table};

/// The multi-step task a session pursues. Deleting is single-shot and never
/// owns a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueKind {
    Training,
    Retraining,
    Predicting,
}

/// A single step in a kind's fixed stage sequence, constraining which inputs
/// are currently acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ModelChoice,
    ParamChoice,
    ParamValue,
    FeatureUpload,
    TargetUpload,
}

impl Stage {
    /// True for stages whose expected input is a document attachment.
    pub fn expects_upload(self) -> bool {
        matches!(self, Stage::FeatureUpload | Stage::TargetUpload)
    }
}

/// Request payload built incrementally across turns — a tagged variant so
/// each kind carries only the fields it actually submits.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftPayload {
    Training {
        model_class: Option<String>,
        parameters: BTreeMap<String, String>,
        features: Option<Table>,
        target: Option<Series>,
    },
    Retraining {
        features: Option<Table>,
        target: Option<Series>,
    },
    Predicting {
        features: Option<Table>,
    },
}

impl DraftPayload {
    pub fn for_kind(kind: DialogueKind) -> Self {
        match kind {
            DialogueKind::Training => Self::Training {
                model_class: None,
                parameters: BTreeMap::new(),
                features: None,
                target: None,
            },
            DialogueKind::Retraining => Self::Retraining {
                features: None,
                target: None,
            },
            DialogueKind::Predicting => Self::Predicting { features: None },
        }
    }

    pub fn kind(&self) -> DialogueKind {
        match self {
            Self::Training { .. } => DialogueKind::Training,
            Self::Retraining { .. } => DialogueKind::Retraining,
            Self::Predicting { .. } => DialogueKind::Predicting,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub kind: DialogueKind,
    pub stage: Stage,
    /// Only acceptable free-text inputs at this stage; empty when the stage
    /// expects a file or arbitrary text.
    pub choices: Vec<String>,
    /// Transient value awaiting its counterpart (a parameter name whose value
    /// comes next turn).
    pub current_selection: Option<String>,
    /// The existing model acted on; set for retraining and predicting.
    pub target_model: Option<ModelId>,
    pub draft: DraftPayload,
}

impl Session {
    pub fn new(kind: DialogueKind, stage: Stage, choices: Vec<String>) -> Self {
        Self {
            kind,
            stage,
            choices,
            current_selection: None,
            target_model: None,
            draft: DraftPayload::for_kind(kind),
        }
    }

    pub fn with_target_model(mut self, model: ModelId) -> Self {
        self.target_model = Some(model);
        self
    }
}
