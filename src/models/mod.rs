//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del registro de ambulancias.

pub mod unit;
