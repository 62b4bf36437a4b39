// Case-study articles: admin CRUD, public published listing, and server-side
// rendering of the editor's block document.

pub mod document;
pub mod handlers;
pub mod input;
pub mod slug;
pub mod store;
