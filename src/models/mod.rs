pub mod backend;
pub mod conversation;
pub mod message;
pub mod subject;

pub use backend::*;
pub use conversation::Conversation;
pub use message::{Message, Role};
pub use subject::Subject;
