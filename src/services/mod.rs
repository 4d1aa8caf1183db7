pub mod auth_service;
pub mod city_service;
pub mod like_service;
pub mod user_service;
pub mod venue_service;
