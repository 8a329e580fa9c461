pub mod assignment;
pub mod checkin;
pub mod event;
pub mod notification;
pub mod profile;
pub mod registration;
pub mod report;
