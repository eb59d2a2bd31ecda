pub mod department;
pub mod instructor;
pub mod user;
