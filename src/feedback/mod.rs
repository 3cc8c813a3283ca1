pub mod client_ip;
pub mod form;
pub mod honeypot;
pub mod notice;

pub use form::{SubmissionForm, SubmitOutcome};
pub use notice::{Notice, NoticeVariant};
