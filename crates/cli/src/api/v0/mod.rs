pub mod znode;
