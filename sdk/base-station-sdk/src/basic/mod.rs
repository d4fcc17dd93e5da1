pub mod actions;
pub mod forms;
pub mod session;
