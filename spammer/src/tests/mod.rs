pub mod common;

pub mod confirmation;
pub mod dispatch;
