// Singleton profile row: display name, intro, education categories, and the
// tools/industries order arrays.

pub mod handlers;
pub mod store;
