pub mod talks;
