pub mod advancement_service;
pub mod collaborators;
pub mod conduct_service;
pub mod evaluation_service;
pub mod interview_service;
pub mod notification_service;
pub mod pipeline_service;
pub mod progress_service;
pub mod template_service;
