pub mod getter;
