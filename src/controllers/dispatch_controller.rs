use crate::dto::api_response::ApiResponse;
use crate::dto::dispatch_dto::{DispatchRequest, DispatchResponse};
use crate::dto::unit_dto::{RegisterUnitRequest, UnitListResponse};
use crate::models::unit::Unit;
use crate::services::DispatchService;
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_location;

pub struct DispatchController {
    service: DispatchService,
}

impl DispatchController {
    pub fn new(service: DispatchService) -> Self {
        Self { service }
    }

    pub async fn register_unit(
        &self,
        request: RegisterUnitRequest,
    ) -> AppResult<ApiResponse<Unit>> {
        let unit = self.service.register_unit(request).await?;

        Ok(ApiResponse::success_with_message(
            unit,
            "Ambulance registered successfully".to_string(),
        ))
    }

    pub async fn list_units(&self) -> AppResult<UnitListResponse> {
        let units = self.service.list_units().await?;
        Ok(UnitListResponse::new(units))
    }

    pub async fn dispatch_emergency(
        &self,
        request: DispatchRequest,
    ) -> AppResult<DispatchResponse> {
        // Validar ubicación del paciente
        let location = parse_location(request.latitude.as_ref(), request.longitude.as_ref())?;

        let outcome = self
            .service
            .dispatch_emergency(location, request.caller_phone.as_deref())
            .await?;

        let message = if outcome.degraded {
            format!(
                "No ambulances within {}km. Showing all available ambulances.",
                outcome.radius_km
            )
        } else {
            "Emergency call sent to nearby ambulances".to_string()
        };

        Ok(DispatchResponse {
            success: true,
            message,
            count: outcome.count,
            degraded: outcome.degraded,
            candidates: outcome.candidates,
        })
    }
}
