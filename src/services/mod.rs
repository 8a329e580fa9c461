//! Request-scoped operations. Each function performs one logical read or
//! write against a [`Store`](crate::store::Store) and reshapes the rows for
//! the dashboard; none of them keep state between calls.

pub mod attendees;
pub mod checkin;
pub mod dashboard;
pub mod events;
pub mod notifications;
pub mod reporting;
pub mod team;
