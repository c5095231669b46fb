//! Read models for notification classification — loaded by the platform's
//! persistence layer, never written by this crate.

pub mod alert;
pub mod build;
pub mod configure;
pub mod dynamic_analysis;
pub mod notification;
pub mod subscriber;
pub mod test_record;
pub mod update;
