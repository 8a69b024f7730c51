//! State machine for the app registration flow.
//!
//! Frontends drive this machine instead of tracking modal/form booleans by
//! hand. The happy path is `Idle → FormFilled → ConfirmPending → Processing
//! → Success`; a failed insert lands in `Failed`, which retains the entered
//! values so the user can retry without re-typing.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("operation not valid in state {0}")]
    InvalidTransition(&'static str),
}

/// Current position in the registration flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    FormFilled {
        app_name: String,
        package_name: String,
    },
    /// Confirmation dialog showing the entered values before any write.
    ConfirmPending {
        app_name: String,
        package_name: String,
    },
    /// Insert in flight. No timeout is defined; a hung backend call leaves
    /// the flow here.
    Processing {
        app_name: String,
        package_name: String,
    },
    /// Insert succeeded; the generated key is held for the user to copy.
    Success { app_key: String },
    Failed {
        app_name: String,
        package_name: String,
        message: String,
    },
}

impl FlowState {
    fn name(&self) -> &'static str {
        match self {
            FlowState::Idle => "Idle",
            FlowState::FormFilled { .. } => "FormFilled",
            FlowState::ConfirmPending { .. } => "ConfirmPending",
            FlowState::Processing { .. } => "Processing",
            FlowState::Success { .. } => "Success",
            FlowState::Failed { .. } => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFlow {
    state: FlowState,
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Record the form fields. Both must be non-empty after trimming;
    /// otherwise the flow stays where it is and the validation error is
    /// returned for the frontend to surface.
    pub fn fill(&mut self, app_name: &str, package_name: &str) -> Result<(), FlowError> {
        match self.state {
            FlowState::Idle | FlowState::FormFilled { .. } | FlowState::Failed { .. } => {}
            _ => return Err(FlowError::InvalidTransition(self.state.name())),
        }
        let app_name = app_name.trim();
        let package_name = package_name.trim();
        if app_name.is_empty() || package_name.is_empty() {
            return Err(FlowError::MissingFields);
        }
        self.state = FlowState::FormFilled {
            app_name: app_name.to_string(),
            package_name: package_name.to_string(),
        };
        Ok(())
    }

    /// Submit the form, moving to the confirmation step.
    pub fn submit(&mut self) -> Result<(), FlowError> {
        let (app_name, package_name) = self.take_form()?;
        self.state = FlowState::ConfirmPending {
            app_name,
            package_name,
        };
        Ok(())
    }

    /// Submit without a confirmation step (the simpler UI variant).
    pub fn submit_unconfirmed(&mut self) -> Result<(), FlowError> {
        let (app_name, package_name) = self.take_form()?;
        self.state = FlowState::Processing {
            app_name,
            package_name,
        };
        Ok(())
    }

    /// Confirm the pending registration and start processing.
    pub fn confirm(&mut self) -> Result<(), FlowError> {
        match std::mem::replace(&mut self.state, FlowState::Idle) {
            FlowState::ConfirmPending {
                app_name,
                package_name,
            } => {
                self.state = FlowState::Processing {
                    app_name,
                    package_name,
                };
                Ok(())
            }
            other => {
                let err = FlowError::InvalidTransition(other.name());
                self.state = other;
                Err(err)
            }
        }
    }

    /// Back out of the confirmation dialog, keeping the entered values.
    pub fn cancel(&mut self) -> Result<(), FlowError> {
        match std::mem::replace(&mut self.state, FlowState::Idle) {
            FlowState::ConfirmPending {
                app_name,
                package_name,
            } => {
                self.state = FlowState::FormFilled {
                    app_name,
                    package_name,
                };
                Ok(())
            }
            other => {
                let err = FlowError::InvalidTransition(other.name());
                self.state = other;
                Err(err)
            }
        }
    }

    /// The insert succeeded; the form is cleared and the generated key is
    /// displayed.
    pub fn complete(&mut self, app_key: String) -> Result<(), FlowError> {
        match self.state {
            FlowState::Processing { .. } => {
                self.state = FlowState::Success { app_key };
                Ok(())
            }
            _ => Err(FlowError::InvalidTransition(self.state.name())),
        }
    }

    /// The insert failed; revert to a form-filled-equivalent state with the
    /// entered values retained and the failure message surfaced.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        match std::mem::replace(&mut self.state, FlowState::Idle) {
            FlowState::Processing {
                app_name,
                package_name,
            } => {
                self.state = FlowState::Failed {
                    app_name,
                    package_name,
                    message: message.into(),
                };
                Ok(())
            }
            other => {
                let err = FlowError::InvalidTransition(other.name());
                self.state = other;
                Err(err)
            }
        }
    }

    /// Dismiss a terminal dialog. Returns `true` when the caller must
    /// re-fetch all collections (i.e. after a successful registration).
    pub fn dismiss(&mut self) -> Result<bool, FlowError> {
        match std::mem::replace(&mut self.state, FlowState::Idle) {
            FlowState::Success { .. } => Ok(true),
            FlowState::Failed {
                app_name,
                package_name,
                ..
            } => {
                self.state = FlowState::FormFilled {
                    app_name,
                    package_name,
                };
                Ok(false)
            }
            other => {
                let err = FlowError::InvalidTransition(other.name());
                self.state = other;
                Err(err)
            }
        }
    }

    fn take_form(&mut self) -> Result<(String, String), FlowError> {
        match std::mem::replace(&mut self.state, FlowState::Idle) {
            FlowState::FormFilled {
                app_name,
                package_name,
            }
            | FlowState::Failed {
                app_name,
                package_name,
                ..
            } => Ok((app_name, package_name)),
            other => {
                let err = FlowError::InvalidTransition(other.name());
                self.state = other;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_reaches_success_with_the_generated_key() {
        let mut flow = RegistrationFlow::new();
        flow.fill("Demo", "com.demo.app").unwrap();
        flow.submit().unwrap();
        assert!(matches!(flow.state(), FlowState::ConfirmPending { .. }));
        flow.confirm().unwrap();
        assert!(matches!(flow.state(), FlowState::Processing { .. }));
        flow.complete("apk_1700000000000_a1b2c3d4e5f6".into()).unwrap();
        assert_eq!(
            flow.state(),
            &FlowState::Success {
                app_key: "apk_1700000000000_a1b2c3d4e5f6".into()
            }
        );
        assert!(flow.dismiss().unwrap(), "success dismissal must re-fetch");
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn empty_fields_are_rejected_before_any_transition() {
        let mut flow = RegistrationFlow::new();
        assert_eq!(flow.fill("", "com.demo.app"), Err(FlowError::MissingFields));
        assert_eq!(flow.fill("Demo", "   "), Err(FlowError::MissingFields));
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn failure_retains_entered_values() {
        let mut flow = RegistrationFlow::new();
        flow.fill("Demo", "com.demo.app").unwrap();
        flow.submit_unconfirmed().unwrap();
        flow.fail("duplicate key value violates unique constraint")
            .unwrap();
        assert_eq!(
            flow.state(),
            &FlowState::Failed {
                app_name: "Demo".into(),
                package_name: "com.demo.app".into(),
                message: "duplicate key value violates unique constraint".into(),
            }
        );
        assert!(!flow.dismiss().unwrap(), "failure dismissal must not re-fetch");
        assert_eq!(
            flow.state(),
            &FlowState::FormFilled {
                app_name: "Demo".into(),
                package_name: "com.demo.app".into(),
            }
        );
    }

    #[test]
    fn cancelling_confirmation_returns_to_the_filled_form() {
        let mut flow = RegistrationFlow::new();
        flow.fill("Demo", "com.demo.app").unwrap();
        flow.submit().unwrap();
        flow.cancel().unwrap();
        assert!(matches!(flow.state(), FlowState::FormFilled { .. }));
    }

    #[test]
    fn out_of_order_transitions_are_rejected_without_losing_state() {
        let mut flow = RegistrationFlow::new();
        assert!(flow.submit().is_err());
        assert!(flow.confirm().is_err());
        assert!(flow.complete("apk_1_abc".into()).is_err());
        assert_eq!(flow.state(), &FlowState::Idle);

        flow.fill("Demo", "com.demo.app").unwrap();
        assert!(flow.fail("too early").is_err());
        assert!(matches!(flow.state(), FlowState::FormFilled { .. }));
    }

    #[test]
    fn values_are_trimmed_on_fill() {
        let mut flow = RegistrationFlow::new();
        flow.fill("  Demo  ", " com.demo.app ").unwrap();
        assert_eq!(
            flow.state(),
            &FlowState::FormFilled {
                app_name: "Demo".into(),
                package_name: "com.demo.app".into(),
            }
        );
    }
}
