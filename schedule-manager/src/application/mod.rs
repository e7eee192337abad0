pub mod commands;
pub mod dto;
