//! Required-field validation and the simulated submission timeline.

use crate::core::capability::Capabilities;
use crate::core::config::LandingConfig;

/// Validation failure listing the empty required fields by position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingFields {
    /// Indices (in document order) of required fields left blank.
    pub indices: Vec<usize>,
}

/// Check that every required value has non-whitespace content.
///
/// # Errors
/// Returns [`MissingFields`] naming every blank field so each can be marked.
pub fn validate_required<'a, I>(values: I) -> Result<(), MissingFields>
where
    I: IntoIterator<Item = &'a str>,
{
    let indices: Vec<usize> = values
        .into_iter()
        .enumerate()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(idx, _)| idx)
        .collect();
    if indices.is_empty() {
        Ok(())
    } else {
        Err(MissingFields { indices })
    }
}

/// Visible stage of a fake submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitStage {
    /// Spinner shown, button disabled.
    Sending,
    /// Success text shown, button still disabled.
    Accepted,
    /// Enclosing modal closed.
    Closed,
    /// Button markup restored, form cleared, button enabled.
    Reset,
}

/// One scheduled stage, relative to the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitStep {
    /// Stage entered.
    pub stage: SubmitStage,
    /// Delay after the previous step.
    pub after_ms: u32,
}

/// Timeline of a submission that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitPlan {
    /// Steps in order, starting with the immediate `Sending` stage.
    pub steps: [SubmitStep; 4],
}

impl SubmitPlan {
    /// Build the timeline for the given device.
    #[must_use]
    pub fn for_device(caps: &Capabilities, config: &LandingConfig) -> Self {
        let forms = &config.forms;
        Self {
            steps: [
                SubmitStep {
                    stage: SubmitStage::Sending,
                    after_ms: 0,
                },
                SubmitStep {
                    stage: SubmitStage::Accepted,
                    after_ms: caps.tiered(forms.submit_delay_low_perf_ms, forms.submit_delay_ms),
                },
                SubmitStep {
                    stage: SubmitStage::Closed,
                    after_ms: forms.close_after_ms,
                },
                SubmitStep {
                    stage: SubmitStage::Reset,
                    after_ms: forms.reset_after_ms,
                },
            ],
        }
    }

    /// Absolute offset of each stage from submission.
    #[must_use]
    pub fn offsets(&self) -> [(SubmitStage, u32); 4] {
        let mut total = 0u32;
        self.steps.map(|step| {
            total = total.saturating_add(step.after_ms);
            (step.stage, total)
        })
    }

    /// Gate the timeline on the form's required values.
    ///
    /// # Errors
    /// Returns [`MissingFields`] when any required value is blank; the
    /// submission must not start and the form stays where it is.
    pub fn admit<'a, I>(self, required: I) -> Result<Self, MissingFields>
    where
        I: IntoIterator<Item = &'a str>,
    {
        validate_required(required).map(|()| self)
    }

    /// Stage visible `elapsed_ms` after submission.
    #[cfg(test)]
    pub(crate) fn stage_at(&self, elapsed_ms: u32) -> SubmitStage {
        self.offsets()
            .iter()
            .rev()
            .find(|(_, offset)| elapsed_ms >= *offset)
            .map_or(SubmitStage::Sending, |(stage, _)| *stage)
    }
}

/// Whether the submit button is disabled in a stage.
#[must_use]
pub const fn button_disabled(stage: SubmitStage) -> bool {
    !matches!(stage, SubmitStage::Reset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_whitespace_fields_are_reported() {
        let err = validate_required(["Ann", "  ", "", "+7 900"]).unwrap_err();
        assert_eq!(err.indices, vec![1, 2]);
        assert!(validate_required(["a", "b"]).is_ok());
        assert!(validate_required(std::iter::empty()).is_ok());
    }

    #[test]
    fn timeline_matches_device_tier() {
        let config = LandingConfig::default();
        let plan = SubmitPlan::for_device(&Capabilities::default(), &config);
        assert_eq!(
            plan.offsets(),
            [
                (SubmitStage::Sending, 0),
                (SubmitStage::Accepted, 1200),
                (SubmitStage::Closed, 2200),
                (SubmitStage::Reset, 2500),
            ]
        );
        let slow = Capabilities {
            low_performance: true,
            ..Capabilities::default()
        };
        assert_eq!(
            SubmitPlan::for_device(&slow, &config).offsets()[1],
            (SubmitStage::Accepted, 800)
        );
    }

    #[test]
    fn blank_required_field_never_starts_the_timeline() {
        let plan = SubmitPlan::for_device(&Capabilities::default(), &LandingConfig::default());

        let blocked = plan.admit(["Ann", ""]);
        assert_eq!(blocked, Err(MissingFields { indices: vec![1] }));

        let whitespace = plan.admit(["   ", "\t\n"]);
        assert_eq!(
            whitespace.map(|plan| plan.steps),
            Err(MissingFields {
                indices: vec![0, 1]
            })
        );

        let admitted = plan.admit(["Ann", "+7 900"]);
        assert_eq!(admitted, Ok(plan));
        assert_eq!(plan.steps[0].stage, SubmitStage::Sending);
    }

    #[test]
    fn stage_lookup_walks_the_timeline() {
        let plan = SubmitPlan::for_device(&Capabilities::default(), &LandingConfig::default());
        assert_eq!(plan.stage_at(0), SubmitStage::Sending);
        assert_eq!(plan.stage_at(1199), SubmitStage::Sending);
        assert_eq!(plan.stage_at(1200), SubmitStage::Accepted);
        assert!(button_disabled(plan.stage_at(2000)));
        assert_eq!(plan.stage_at(2200), SubmitStage::Closed);
        assert_eq!(plan.stage_at(9000), SubmitStage::Reset);
        assert!(!button_disabled(plan.stage_at(9000)));
    }
}
