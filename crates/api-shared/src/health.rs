use crate::wire::HealthRes;

/// Health check shared by every API surface.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Reports the service as alive.
    ///
    /// No store round-trip is made; a store fault surfaces on the hospital endpoints instead.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Hospital onboarding service is alive".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_health_reports_ok() {
        let res = HealthService::check_health();
        assert!(res.ok);
        assert!(res.message.contains("alive"));
    }
}
