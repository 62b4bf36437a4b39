// Work history: CRUD, manual ordering, and the tool/industry groupings shown
// on the public page.

pub mod embedded;
pub mod groupings;
pub mod handlers;
pub mod input;
pub mod store;
