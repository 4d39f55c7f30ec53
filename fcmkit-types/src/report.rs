use crate::outcome::PatchOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregated result of one hook invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub verdict: Verdict,

    #[serde(default)]
    pub dry_run: bool,

    /// Set when the Podfile changed and `pod install` must be re-run.
    #[serde(default)]
    pub pod_install_required: bool,

    #[serde(default)]
    pub outcomes: Vec<PatchOutcome>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileChange>,
}

impl HookReport {
    pub fn new(tool: ToolInfo) -> Self {
        Self {
            schema: crate::schema::FCMKIT_REPORT_V1.to_string(),
            tool,
            run: RunInfo {
                run_id: Uuid::new_v4(),
                started_at: Utc::now(),
                ended_at: None,
            },
            verdict: Verdict::default(),
            dry_run: false,
            pod_install_required: false,
            outcomes: vec![],
            files: vec![],
        }
    }

    pub fn push_outcome(&mut self, outcome: PatchOutcome) {
        self.outcomes.push(outcome);
    }

    /// All warnings across outcomes, in the order they were produced.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .flat_map(|o| o.warnings.iter().map(String::as_str))
    }

    /// Stamp the end time and compute the verdict.
    pub fn finish(&mut self) {
        let mut counts = Counts::default();
        for o in &self.outcomes {
            if o.modified {
                counts.modified += 1;
            } else {
                counts.unchanged += 1;
            }
            counts.warnings += o.warnings.len() as u64;
        }
        self.verdict = Verdict {
            status: if counts.warnings > 0 {
                VerdictStatus::Warn
            } else {
                VerdictStatus::Pass
            },
            counts,
        };
        self.run.ended_at = Some(Utc::now());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub counts: Counts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    #[default]
    Pass,
    Warn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub modified: u64,
    pub unchanged: u64,
    pub warnings: u64,
}

/// A file written during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,

    /// Absent when the file did not exist before the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_sha256: Option<String>,
    pub after_sha256: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_bytes: Option<u64>,
    pub after_bytes: u64,
}
