//! Services module
//!
//! Este módulo contiene la lógica de negocio del despacho: distancias,
//! registro de unidades, matching y formateo de contacto.

pub mod contact_formatter;
pub mod dispatch_matcher;
pub mod dispatch_service;
pub mod geo_math;
pub mod unit_registry;

pub use dispatch_service::*;
