use crate::{
    frame::{Frame, TrajectoryPoint},
    stage::{PlanningEnv, Stage, StageKind, StageStatus},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioStatus {
    Unknown,
    Processing,
    Done,
}

/// Runs a sequence of stages sharing one context.
///
/// `factory` creates the stage a finished stage hands over to.
pub struct Scenario<S, F>
where
    S: Stage,
{
    current: S,
    context: S::Context,
    factory: F,
    status: ScenarioStatus,
}

impl<S, F> Scenario<S, F>
where
    S: Stage,
    F: FnMut(StageKind) -> Option<S>,
{
    pub fn new(first: S, context: S::Context, factory: F) -> Self {
        Self {
            current: first,
            context,
            factory,
            status: ScenarioStatus::Unknown,
        }
    }

    pub fn status(&self) -> ScenarioStatus {
        self.status
    }

    pub fn context(&self) -> &S::Context {
        &self.context
    }

    pub fn current_stage(&self) -> &S {
        &self.current
    }

    /// Restarts the scenario from `first` with a fresh context.
    pub fn reset(&mut self, first: S)
    where
        S::Context: Default,
    {
        self.current = first;
        self.context = Default::default();
        self.status = ScenarioStatus::Unknown;
    }

    pub fn process(
        &mut self,
        init_point: &TrajectoryPoint,
        frame: &mut Frame,
        env: &mut PlanningEnv<'_>,
    ) -> ScenarioStatus {
        if self.status == ScenarioStatus::Done {
            log::warn!("scenario is already done");
            return self.status;
        }

        let kind = self.current.kind();
        self.status = match self
            .current
            .process(init_point, frame, &mut self.context, env)
        {
            StageStatus::Running => ScenarioStatus::Processing,
            StageStatus::Error => {
                log::error!("stage {} returns error", kind);
                ScenarioStatus::Done
            }
            StageStatus::Finished => match self.current.next_stage() {
                None => ScenarioStatus::Done,
                Some(next) if next == kind => ScenarioStatus::Processing,
                Some(next) => match (self.factory)(next) {
                    Some(stage) => {
                        log::debug!("stage {} -> {}", kind, next);
                        self.current = stage;
                        ScenarioStatus::Processing
                    }
                    None => {
                        log::error!("failed to create stage {}", next);
                        ScenarioStatus::Done
                    }
                },
            },
        };
        self.status
    }
}
