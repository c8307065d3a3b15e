pub mod controller;
pub mod debounce;
pub mod events;
pub mod logging;
pub mod profile;
pub mod services;
pub mod state;

#[cfg(test)]
mod tests;
