//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos, variables de entorno
//! y la política de despacho.

pub mod database;
pub mod environment;

pub use environment::*;
