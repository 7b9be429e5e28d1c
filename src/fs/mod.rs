pub mod layout;
pub mod locking;
pub mod renumber;
