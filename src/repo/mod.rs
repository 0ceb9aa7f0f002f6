pub mod activities;
pub mod day_trips;
pub mod events;
pub mod programs;
pub mod services;
pub mod users;
pub mod weddings;
