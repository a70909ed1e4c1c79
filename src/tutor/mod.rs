pub mod context;
pub mod fallback;
pub mod service;
pub mod title;

pub use service::{InquiryRequest, ReplyMetadata, SocraticReply, TutorError, TutorService};
