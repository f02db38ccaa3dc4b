pub mod User;
