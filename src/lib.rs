//! Emergency Resource Dispatch
//!
//! Registro de ambulancias geolocalizadas y búsqueda de las unidades más
//! cercanas a una emergencia.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
