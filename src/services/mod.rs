// Business logic service implementations

pub mod dates;
pub mod health;
pub mod submission_service;
pub mod visitor_service;
