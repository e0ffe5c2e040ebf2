pub mod evaluation_dto;
pub mod interview_dto;
