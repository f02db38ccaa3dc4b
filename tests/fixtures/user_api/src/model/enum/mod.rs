pub mod Role;
