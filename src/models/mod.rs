pub mod evaluation;
pub mod interview;
pub mod pipeline;
pub mod progress;
pub mod question;
pub mod response;
pub mod session;
pub mod template;
