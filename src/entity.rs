pub mod attendance;

pub use attendance::Entity as Attendance;
