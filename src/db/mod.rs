pub mod activities;
pub mod db;
pub mod health_events;
pub mod migrations;
pub mod sessions;
pub mod tasks;
