pub mod api_response;
pub mod dispatch_dto;
pub mod unit_dto;
