pub mod health;
pub mod talks;
