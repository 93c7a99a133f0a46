//! Failure bookkeeping and recovery escalation
//!
//! Counts consecutive failed poll ticks and decides what to do about them:
//! retry silently, show the error and reset the link, or restart the
//! device once link resets stop helping.
//!
//! ```text
//!   success ──────────────────────────────► Healthy
//!   failure (< threshold) ────────────────► Degraded      [None]
//!   failure (>= threshold, budget left) ──► Alerting      [ShowTransientError, AttemptLinkRecovery]
//!   failure (>= threshold, no budget) ────► Exhausted     [ShowTransientError, HardRestart]
//! ```

use heapless::Vec;

use crate::error::FailureClass;

/// Corrective action for the poll loop to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecoveryAction {
    /// Retry silently on the next interval
    None,
    /// Show the failure label on the price slot
    ShowTransientError(&'static str),
    /// Power-cycle and reconnect the link, then recreate the session
    AttemptLinkRecovery,
    /// Restart the device; nothing runs after this
    HardRestart,
}

/// Actions produced by one failed tick, executed in order
pub type Escalation = Vec<RecoveryAction, 2>;

/// Derived health view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Health {
    /// No failure since the last success
    Healthy,
    /// Failing, below the threshold
    Degraded,
    /// At the threshold, link resets still allowed
    Alerting,
    /// Link reset budget used up
    Exhausted,
}

/// Failure counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FailureState {
    /// Failed ticks since the last success
    pub consecutive_failures: u8,
    /// Link resets since the last success
    pub recovery_attempts: u8,
}

/// Recovery state machine
#[derive(Debug, Clone)]
pub struct RecoveryController {
    state: FailureState,
    max_failed_attempts: u8,
    max_recovery_attempts: u8,
}

impl RecoveryController {
    /// Create a controller with the given thresholds
    pub fn new(max_failed_attempts: u8, max_recovery_attempts: u8) -> Self {
        Self {
            state: FailureState::default(),
            max_failed_attempts: max_failed_attempts.max(1),
            max_recovery_attempts,
        }
    }

    /// Current counters
    pub fn state(&self) -> FailureState {
        self.state
    }

    /// Failed ticks since the last success
    pub fn consecutive_failures(&self) -> u8 {
        self.state.consecutive_failures
    }

    /// Link resets since the last success
    pub fn recovery_attempts(&self) -> u8 {
        self.state.recovery_attempts
    }

    /// Derive the health view from the counters
    pub fn health(&self) -> Health {
        if self.state.recovery_attempts >= self.max_recovery_attempts {
            Health::Exhausted
        } else if self.state.consecutive_failures >= self.max_failed_attempts {
            Health::Alerting
        } else if self.state.consecutive_failures > 0 {
            Health::Degraded
        } else {
            Health::Healthy
        }
    }

    /// Record a fully successful tick
    pub fn record_success(&mut self) {
        self.state = FailureState::default();
    }

    /// Record a failed tick and decide the escalation
    pub fn handle_failure(&mut self, class: FailureClass) -> Escalation {
        self.state.consecutive_failures = self.state.consecutive_failures.saturating_add(1);

        let mut actions = Escalation::new();
        if self.state.consecutive_failures < self.max_failed_attempts {
            let _ = actions.push(RecoveryAction::None);
            return actions;
        }

        let _ = actions.push(RecoveryAction::ShowTransientError(class.label()));
        if self.state.recovery_attempts < self.max_recovery_attempts {
            let _ = actions.push(RecoveryAction::AttemptLinkRecovery);
        } else {
            let _ = actions.push(RecoveryAction::HardRestart);
        }
        actions
    }

    /// Record a link reset that brought the link back
    pub fn recovery_succeeded(&mut self) {
        self.state.consecutive_failures = 0;
        self.state.recovery_attempts = self.state.recovery_attempts.saturating_add(1);
    }

    /// Record a link reset that failed
    pub fn recovery_failed(&mut self) {
        self.state.recovery_attempts = self.state.recovery_attempts.saturating_add(1);
    }
}

impl Default for RecoveryController {
    fn default() -> Self {
        Self::new(
            crate::config::MAX_FAILED_ATTEMPTS,
            crate::config::MAX_RECOVERY_ATTEMPTS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(escalation: &Escalation) -> &[RecoveryAction] {
        escalation.as_slice()
    }

    #[test]
    fn test_two_failures_then_success() {
        let mut controller = RecoveryController::default();

        for _ in 0..2 {
            let escalation = controller.handle_failure(FailureClass::Connection);
            assert_eq!(actions(&escalation), &[RecoveryAction::None]);
        }
        assert_eq!(controller.health(), Health::Degraded);

        controller.record_success();
        assert_eq!(controller.consecutive_failures(), 0);
        assert_eq!(controller.health(), Health::Healthy);
    }

    #[test]
    fn test_threshold_shows_error_then_recovers() {
        let mut controller = RecoveryController::default();
        controller.handle_failure(FailureClass::Decode);
        controller.handle_failure(FailureClass::Decode);

        let escalation = controller.handle_failure(FailureClass::Decode);
        assert_eq!(
            actions(&escalation),
            &[
                RecoveryAction::ShowTransientError("JSON Error"),
                RecoveryAction::AttemptLinkRecovery,
            ]
        );
        assert_eq!(controller.health(), Health::Alerting);

        controller.recovery_succeeded();
        assert_eq!(controller.recovery_attempts(), 1);
        assert_eq!(controller.consecutive_failures(), 0);
    }

    #[test]
    fn test_classes_count_identically() {
        let mut controller = RecoveryController::default();
        controller.handle_failure(FailureClass::Connection);
        controller.handle_failure(FailureClass::Api);

        let escalation = controller.handle_failure(FailureClass::Decode);
        assert_eq!(escalation.len(), 2);
        assert_eq!(
            escalation[0],
            RecoveryAction::ShowTransientError("JSON Error")
        );
    }

    #[test]
    fn test_failed_recoveries_lead_to_restart() {
        let mut controller = RecoveryController::default();
        controller.handle_failure(FailureClass::Connection);
        controller.handle_failure(FailureClass::Connection);

        // Each further failure escalates again while the link stays down
        for attempt in 1..=3 {
            let escalation = controller.handle_failure(FailureClass::Connection);
            assert_eq!(escalation[1], RecoveryAction::AttemptLinkRecovery);
            controller.recovery_failed();
            assert_eq!(controller.recovery_attempts(), attempt);
        }
        assert_eq!(controller.health(), Health::Exhausted);

        let escalation = controller.handle_failure(FailureClass::Connection);
        assert_eq!(
            actions(&escalation),
            &[
                RecoveryAction::ShowTransientError("Conn Error"),
                RecoveryAction::HardRestart,
            ]
        );
    }

    #[test]
    fn test_successful_recoveries_still_count() {
        let mut controller = RecoveryController::default();

        for _ in 0..3 {
            for _ in 0..2 {
                controller.handle_failure(FailureClass::Api);
            }
            let escalation = controller.handle_failure(FailureClass::Api);
            assert_eq!(escalation[1], RecoveryAction::AttemptLinkRecovery);
            controller.recovery_succeeded();
        }

        // Below threshold again: silent
        let escalation = controller.handle_failure(FailureClass::Api);
        assert_eq!(actions(&escalation), &[RecoveryAction::None]);

        controller.handle_failure(FailureClass::Api);
        let escalation = controller.handle_failure(FailureClass::Api);
        assert_eq!(escalation[1], RecoveryAction::HardRestart);
    }

    #[test]
    fn test_success_clears_recovery_budget() {
        let mut controller = RecoveryController::default();
        for _ in 0..3 {
            controller.handle_failure(FailureClass::Connection);
        }
        controller.recovery_failed();
        controller.record_success();

        assert_eq!(controller.state(), FailureState::default());
        assert_eq!(controller.health(), Health::Healthy);
    }
}
