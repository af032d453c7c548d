pub mod seaorm;
pub mod memory;
