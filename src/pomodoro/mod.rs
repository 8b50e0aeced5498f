pub mod pomodoro;
pub mod runner;
pub mod stats;
pub mod timer;
