//! Markdown `Display` implementations for domain models.

use std::fmt;

use super::datetime::{LocalDateTime, WaitTime};
use crate::models::{
    ExposurePlan, ExposureTarget, GenerationReport, GenerationStatus, Journey, Lifecycle,
    PlanProgress, SyncState, Tier,
};

const UNNAMED_PLAN: &str = "(unnamed plan)";

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ExposurePlan {
    /// The plan's name, or a placeholder while it is unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_PLAN
        } else {
            &self.name
        }
    }
}

impl fmt::Display for ExposurePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.display_name())?;
        writeln!(f)?;

        writeln!(f, "- Targets: {}", self.targets.len())?;
        if !self.targets.is_empty() {
            writeln!(f, "- Total wait: {}", WaitTime(self.total_wait_seconds()))?;
        }
        writeln!(f, "- Sync: {}", self.sync_state)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.targets.is_empty() {
            writeln!(f, "\nNo targets in this plan.")?;
        } else {
            writeln!(f, "\n## Targets")?;
            writeln!(f)?;
            for target in &self.targets {
                write!(f, "{target}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for ExposureTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} (ID: {})",
            self.order_index + 1,
            self.name,
            self.id
        )?;
        writeln!(f)?;
        writeln!(f, "- Location: {}", self.coordinate)?;
        writeln!(
            f,
            "- Wait: {}",
            WaitTime(u64::from(self.wait_time_seconds))
        )?;
        if !self.lifecycle.is_active() {
            writeln!(f, "- Deleted")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl Journey {
    fn state_label(&self) -> &'static str {
        if !self.lifecycle.is_active() {
            "deleted"
        } else if self.completed {
            "completed"
        } else if self.is_current {
            "recording"
        } else {
            "ended"
        }
    }
}

impl fmt::Display for Journey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Journey {} ({})", self.id, self.state_label())?;
        writeln!(f)?;
        match self.plan_id {
            Some(plan_id) => writeln!(f, "- Plan: {plan_id}")?,
            None => writeln!(f, "- Plan: none")?,
        }
        writeln!(f, "- Started: {}", LocalDateTime(&self.started_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for PlanProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Progress for plan {}", self.plan_id)?;
        writeln!(f)?;

        if !self.has_attempts() {
            writeln!(f, "No attempts yet.")?;
            return Ok(());
        }

        writeln!(
            f,
            "- Attempts: {} ({} completed)",
            self.total_attempts, self.completed_attempts
        )?;
        writeln!(
            f,
            "- Best: {}/{} targets",
            self.best_targets_reached, self.total_targets
        )?;
        writeln!(f, "- Average: {:.1} targets", self.average_targets_reached)?;
        if let Some(last) = &self.last_attempt_date {
            writeln!(f, "- Last attempt: {}", LocalDateTime(last))?;
        }

        if !self.attempts.is_empty() {
            writeln!(f, "\n## Attempts")?;
            writeln!(f)?;
            for attempt in &self.attempts {
                let mark = if attempt.completed { "✓" } else { "○" };
                writeln!(
                    f,
                    "- {mark} Journey {}: {}/{} reached, started {}",
                    attempt.journey_id,
                    attempt.targets_reached,
                    self.total_targets,
                    LocalDateTime(&attempt.started_at)
                )?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            GenerationStatus::Generated { tier } => {
                writeln!(
                    f,
                    "Generated {} targets for plan {} ({tier} search)",
                    self.targets.len(),
                    self.plan_id
                )?;
                writeln!(f)?;
                for target in &self.targets {
                    write!(f, "{target}")?;
                }
            }
            GenerationStatus::NoCandidates => {
                writeln!(
                    f,
                    "No suitable places found near the origin; plan {} is unchanged.",
                    self.plan_id
                )?;
            }
            GenerationStatus::Inconclusive => {
                writeln!(
                    f,
                    "Could not determine the street at the origin; plan {} is unchanged.",
                    self.plan_id
                )?;
            }
        }

        Ok(())
    }
}
