pub mod unit_repository;
