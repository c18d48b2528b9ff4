use crate::error::DeliveryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub destination: String,
    pub result: Result<(), DeliveryError>,
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub outcomes: Vec<DeliveryOutcome>,
    pub succeeded: usize,
    pub failed: usize,
}

impl DeliveryReport {
    pub fn from_outcomes(outcomes: Vec<DeliveryOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.len() - succeeded;

        Self {
            outcomes,
            succeeded,
            failed,
        }
    }

    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// At least one destination took the payload. An empty report is not a success.
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &DeliveryError)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.result {
            Ok(()) => None,
            Err(error) => Some((outcome.destination.as_str(), error)),
        })
    }
}
