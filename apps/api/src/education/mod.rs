// Education entries, grouped by category and ordered manually within it.

pub mod handlers;
pub mod input;
pub mod store;
