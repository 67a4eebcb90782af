use crate::events::TdEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TutorialStep {
    PlaceTower,
    DefeatEnemy,
    SurviveWave,
    Complete,
}

impl TutorialStep {
    pub fn message(self) -> &'static str {
        match self {
            TutorialStep::PlaceTower => "Place a tower next to the road.",
            TutorialStep::DefeatEnemy => "Your tower fires on its own. Defeat an enemy.",
            TutorialStep::SurviveWave => "Defeated enemies pay supply. Hold out until the next wave.",
            TutorialStep::Complete => "Tutorial complete.",
        }
    }

    fn next(self) -> Option<TutorialStep> {
        match self {
            TutorialStep::PlaceTower => Some(TutorialStep::DefeatEnemy),
            TutorialStep::DefeatEnemy => Some(TutorialStep::SurviveWave),
            TutorialStep::SurviveWave => Some(TutorialStep::Complete),
            TutorialStep::Complete => None,
        }
    }

    fn is_satisfied_by(self, event: &TdEvent) -> bool {
        match (self, event) {
            (TutorialStep::PlaceTower, TdEvent::TowerPlaced { .. }) => true,
            (TutorialStep::DefeatEnemy, TdEvent::EnemyDefeated { .. }) => true,
            (TutorialStep::SurviveWave, TdEvent::WaveStarted { wave, .. }) => *wave >= 2,
            _ => false,
        }
    }
}

/// Guided first level. Each step is announced exactly once when entered.
#[derive(Clone, Debug, Default)]
pub struct Tutorial {
    step: Option<TutorialStep>,
}

impl Tutorial {
    /// A tutorial that never starts.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn start(out_events: &mut Vec<TdEvent>) -> Self {
        let mut tutorial = Self::default();
        tutorial.enter(TutorialStep::PlaceTower, out_events);
        tutorial
    }

    pub fn step(&self) -> Option<TutorialStep> {
        self.step
    }

    pub fn is_active(&self) -> bool {
        matches!(self.step, Some(step) if step != TutorialStep::Complete)
    }

    /// Advance past the current step if `event` completes it.
    pub fn observe(&mut self, event: &TdEvent, out_events: &mut Vec<TdEvent>) {
        let current = match self.step {
            Some(step) => step,
            None => return,
        };
        if current.is_satisfied_by(event) {
            if let Some(next) = current.next() {
                self.enter(next, out_events);
            }
        }
    }

    fn enter(&mut self, step: TutorialStep, out_events: &mut Vec<TdEvent>) {
        tracing::info!(?step, "tutorial step");
        self.step = Some(step);
        out_events.push(TdEvent::TutorialStepStarted {
            step,
            message: step.message(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnemyKind, TowerKind};
    use glam::Vec2;
    use sim_core::EntityAllocator;

    fn started(events: &[TdEvent]) -> Vec<TutorialStep> {
        events
            .iter()
            .filter_map(|e| match e {
                TdEvent::TutorialStepStarted { step, .. } => Some(*step),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_walks_every_step_once() {
        let mut ids = EntityAllocator::new();
        let mut out = Vec::new();
        let mut tutorial = Tutorial::start(&mut out);

        let placed = TdEvent::TowerPlaced {
            id: ids.allocate(),
            kind: TowerKind::Archer,
            position: Vec2::ZERO,
        };
        let defeated = TdEvent::EnemyDefeated {
            id: ids.allocate(),
            kind: EnemyKind::Goblin,
            reward: 5,
        };

        tutorial.observe(&placed, &mut out);
        tutorial.observe(&placed, &mut out);
        tutorial.observe(&TdEvent::WaveStarted { wave: 2, size: 5 }, &mut out);
        tutorial.observe(&defeated, &mut out);
        tutorial.observe(&TdEvent::WaveStarted { wave: 1, size: 4 }, &mut out);
        assert!(tutorial.is_active());
        tutorial.observe(&TdEvent::WaveStarted { wave: 2, size: 5 }, &mut out);
        tutorial.observe(&defeated, &mut out);

        assert_eq!(
            started(&out),
            vec![
                TutorialStep::PlaceTower,
                TutorialStep::DefeatEnemy,
                TutorialStep::SurviveWave,
                TutorialStep::Complete,
            ]
        );
        assert!(!tutorial.is_active());
    }

    #[test]
    fn test_disabled_tutorial_is_silent() {
        let mut out = Vec::new();
        let mut tutorial = Tutorial::disabled();
        tutorial.observe(&TdEvent::GameOver, &mut out);
        assert!(out.is_empty());
        assert_eq!(tutorial.step(), None);
    }
}
